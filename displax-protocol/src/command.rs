//! Command and response identifiers
//!
//! Commands are sent as little-endian 16-bit values. Each response starts
//! with the identifier of the command it answers, except RESET which is
//! answered with [`Command::ResetResponse`].

use core::fmt;

/// Size of an identifier on the wire
pub const COMMAND_SIZE: usize = 2;

// Fixed response lengths, identifier included
pub const HID_DESCRIPTOR_RESPONSE_SIZE: usize = 32;
pub const HID_REPORT_DESCRIPTOR_RESPONSE_SIZE: usize = 708;
pub const FRAME_SIZE_RESPONSE_SIZE: usize = 6;
pub const ACK_RESPONSE_SIZE: usize = 2;

/// Protocol message identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Command {
    /// Reset sensor (answered with `ResetResponse`)
    Reset = 0x0000,
    /// Request HID descriptor
    GetHidDescriptor = 0x0001,
    /// Request HID report descriptor
    GetHidReportDescription = 0x0002,
    /// Request sensor frame dimensions
    GetFrameSize = 0x0003,
    /// Touch report (sensor → host only)
    TouchReport = 0x0004,
    /// Enable touch event streaming
    EnableReporting = 0x0005,
    /// Disable touch event streaming
    DisableReporting = 0x0006,
    /// Answer to `Reset`
    ResetResponse = 0x226E,
    /// Disable USB touch reporting
    DisableUsbReporting = 0xFF00,
    /// Enable USB touch reporting
    EnableUsbReporting = 0xFF01,
}

impl Command {
    /// Parse an identifier
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            0x0000 => Some(Command::Reset),
            0x0001 => Some(Command::GetHidDescriptor),
            0x0002 => Some(Command::GetHidReportDescription),
            0x0003 => Some(Command::GetFrameSize),
            0x0004 => Some(Command::TouchReport),
            0x0005 => Some(Command::EnableReporting),
            0x0006 => Some(Command::DisableReporting),
            0x226E => Some(Command::ResetResponse),
            0xFF00 => Some(Command::DisableUsbReporting),
            0xFF01 => Some(Command::EnableUsbReporting),
            _ => None,
        }
    }

    /// Read the identifier at the start of `data`
    ///
    /// Returns `None` if fewer than two bytes are available.
    pub fn peek_id(data: &[u8]) -> Option<u16> {
        match data {
            [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
            _ => None,
        }
    }

    /// Numeric identifier
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Wire encoding
    pub const fn to_bytes(self) -> [u8; COMMAND_SIZE] {
        self.id().to_le_bytes()
    }

    /// Minimum number of buffered bytes before the response to this
    /// identifier can be decoded
    pub const fn response_size(self) -> usize {
        match self {
            Command::GetHidDescriptor => HID_DESCRIPTOR_RESPONSE_SIZE,
            Command::GetHidReportDescription => HID_REPORT_DESCRIPTOR_RESPONSE_SIZE,
            Command::GetFrameSize => FRAME_SIZE_RESPONSE_SIZE,
            Command::TouchReport => crate::touch::TOUCH_REPORT_SIZE,
            Command::Reset
            | Command::EnableReporting
            | Command::DisableReporting
            | Command::ResetResponse
            | Command::DisableUsbReporting
            | Command::EnableUsbReporting => ACK_RESPONSE_SIZE,
        }
    }

    /// Protocol name, as used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Command::Reset => "RESET",
            Command::GetHidDescriptor => "GET_HID_DESCRIPTOR",
            Command::GetHidReportDescription => "GET_HID_REPORT_DESCRIPTION",
            Command::GetFrameSize => "GET_FRAME_SIZE",
            Command::TouchReport => "TOUCH_REPORT_ID",
            Command::EnableReporting => "ENABLE_REPORTING",
            Command::DisableReporting => "DISABLE_REPORTING",
            Command::ResetResponse => "RESET_RESPONSE",
            Command::DisableUsbReporting => "DISABLE_USB_REPORTING",
            Command::EnableUsbReporting => "ENABLE_USB_REPORTING",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06X})", self.name(), self.id())
    }
}

/// Parse a frame-size response into `(width, height)`
///
/// Layout: identifier(2) + width(2, LE) + height(2, LE).
pub fn parse_frame_size(data: &[u8]) -> Option<(u16, u16)> {
    match data {
        [_, _, w0, w1, h0, h1, ..] => Some((
            u16::from_le_bytes([*w0, *w1]),
            u16::from_le_bytes([*h0, *h1]),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    const ALL: [Command; 10] = [
        Command::Reset,
        Command::GetHidDescriptor,
        Command::GetHidReportDescription,
        Command::GetFrameSize,
        Command::TouchReport,
        Command::EnableReporting,
        Command::DisableReporting,
        Command::ResetResponse,
        Command::DisableUsbReporting,
        Command::EnableUsbReporting,
    ];

    #[test]
    fn test_from_id_matches_discriminant() {
        for command in ALL {
            assert_eq!(Command::from_id(command.id()), Some(command));
        }
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(Command::from_id(0x1234), None);
        assert_eq!(Command::from_id(0x0007), None);
    }

    #[test]
    fn test_little_endian_encoding() {
        assert_eq!(Command::Reset.to_bytes(), [0x00, 0x00]);
        assert_eq!(Command::ResetResponse.to_bytes(), [0x6E, 0x22]);
        assert_eq!(Command::DisableUsbReporting.to_bytes(), [0x00, 0xFF]);
    }

    #[test]
    fn test_peek_id() {
        assert_eq!(Command::peek_id(&[]), None);
        assert_eq!(Command::peek_id(&[0x6E]), None);
        assert_eq!(Command::peek_id(&[0x6E, 0x22, 0xFF]), Some(0x226E));
    }

    #[test]
    fn test_response_sizes() {
        assert_eq!(Command::GetHidDescriptor.response_size(), 32);
        assert_eq!(Command::GetHidReportDescription.response_size(), 708);
        assert_eq!(Command::GetFrameSize.response_size(), 6);
        assert_eq!(Command::TouchReport.response_size(), 72);
        assert_eq!(Command::EnableReporting.response_size(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Command::ResetResponse), "RESET_RESPONSE (0x226E)");
        assert_eq!(format!("{}", Command::GetFrameSize), "GET_FRAME_SIZE (0x0003)");
    }

    #[test]
    fn test_parse_frame_size() {
        let response = [0x03, 0x00, 0x80, 0x07, 0x38, 0x04];
        assert_eq!(parse_frame_size(&response), Some((1920, 1080)));
        assert_eq!(parse_frame_size(&response[..5]), None);
    }
}
