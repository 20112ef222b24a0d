//! Message dispatch and frame synchronization

use displax_hal::SerialTransport;
use displax_protocol::{
    find_header, parse_frame_size, Command, FrameSize, TouchReport, TouchReportError,
    TOUCH_HEADER_SIZE, TOUCH_PAYLOAD_SIZE, TOUCH_REPORT_SIZE,
};

use super::DisplaxTouch;
use crate::state::Event;

impl<T: SerialTransport> DisplaxTouch<'_, T> {
    /// Decode at most one message from the front of the buffer
    pub(super) fn decode(&mut self, now_ms: u32) {
        let Some(id) = Command::peek_id(self.rx.as_slice()) else {
            return;
        };
        let buffered = self.rx.len();

        match Command::from_id(id) {
            // RESET is never sent by the sensor
            Some(command)
                if command != Command::Reset && buffered >= command.response_size() =>
            {
                self.handle(command, buffered, now_ms)
            }
            // Anything else that fills a touch report is garbage
            _ if buffered >= TOUCH_REPORT_SIZE => {
                self.warn(format_args!(
                    "Unknown report {:#06X}, searching for frame header",
                    id
                ));
                self.apply(Event::SyncLost);
            }
            _ => {}
        }
    }

    fn handle(&mut self, command: Command, buffered: usize, now_ms: u32) {
        match command {
            Command::TouchReport => {
                self.process_touch_report();
                return;
            }
            Command::GetHidDescriptor => {
                self.info(format_args!("Received HID descriptor (length: {})", buffered));
            }
            Command::GetHidReportDescription => {
                self.info(format_args!(
                    "Received HID report descriptor (length: {})",
                    buffered
                ));
            }
            Command::GetFrameSize => {
                if let Some((width, height)) = parse_frame_size(self.rx.as_slice()) {
                    self.frame_size = FrameSize::new(width, height);
                    self.info(format_args!(
                        "Received frame size (width: {}, height: {})",
                        width, height
                    ));
                }
            }
            Command::EnableReporting => {
                self.info(format_args!("Received enable reporting response"));
            }
            Command::DisableReporting => {
                self.info(format_args!("Received disable reporting (length: {})", buffered));
            }
            Command::ResetResponse => match self.init_started_ms {
                Some(started) => self.info(format_args!(
                    "Received reset response (initialization time: {} ms)",
                    now_ms.wrapping_sub(started)
                )),
                None => self.info(format_args!("Received reset response")),
            },
            Command::DisableUsbReporting => {
                self.info(format_args!("Received disable USB reporting response"));
            }
            Command::EnableUsbReporting => {
                self.info(format_args!("Received enable USB reporting response"));
            }
            // Filtered out by decode()
            Command::Reset => return,
        }

        self.rx.consume(command.response_size());

        // Follow-up of the initialization chain:
        // RESET → GET_FRAME_SIZE → DISABLE_USB_REPORTING → ENABLE_REPORTING
        match command {
            Command::ResetResponse => {
                self.apply(Event::ResetAcknowledged);
                self.init_started_ms = None;
                let _ = self.send_command(Command::GetFrameSize);
            }
            Command::GetFrameSize => {
                let _ = self.send_command(Command::DisableUsbReporting);
            }
            Command::DisableUsbReporting => {
                let _ = self.send_command(Command::EnableReporting);
            }
            Command::EnableReporting => self.apply(Event::ReportingEnabled),
            _ => {}
        }
    }

    fn process_touch_report(&mut self) {
        match TouchReport::parse(self.rx.as_slice(), self.frame_size) {
            Ok(report) => {
                self.touches = report.points;
                self.scan_time = report.scan_time;
                self.listeners.notify(&self.touches);
                self.rx.consume(TOUCH_REPORT_SIZE);
            }
            Err(err) => {
                match err {
                    // decode() only dispatches with a full report buffered
                    TouchReportError::Truncated => {
                        self.warn(format_args!("Truncated touch report, re-synchronizing"));
                    }
                    TouchReportError::InvalidHeader => {
                        self.warn(format_args!("Invalid touch frame header, re-synchronizing"));
                    }
                    TouchReportError::PayloadSize(size) => self.warn(format_args!(
                        "Unexpected touch report payload size: {}, expected: {}",
                        size, TOUCH_PAYLOAD_SIZE
                    )),
                    TouchReportError::CrcMismatch { expected, actual } => {
                        self.warn(format_args!(
                            "CRC mismatch (expected {:#010X}, got {:#010X}), re-synchronizing",
                            expected, actual
                        ))
                    }
                }

                // Skip one byte so the header search starts past this frame
                self.rx.consume(1);
                self.apply(Event::SyncLost);
            }
        }
    }

    /// Realign the buffer on the next touch report header
    ///
    /// Without a header anywhere in the buffer, everything is dropped.
    pub(super) fn synchronize(&mut self) {
        if self.rx.len() < TOUCH_HEADER_SIZE {
            return;
        }

        match find_header(self.rx.as_slice()) {
            Some(0) => {
                self.info(format_args!("Synchronized at frame header"));
            }
            Some(offset) => {
                self.info(format_args!(
                    "Synchronizing: discarding {} bytes before header",
                    offset
                ));
                self.rx.consume(offset);
            }
            None => {
                self.info(format_args!("No header found, discarding buffer"));
                self.rx.consume(self.rx.len());
                return;
            }
        }

        self.apply(Event::HeaderFound);
    }
}
