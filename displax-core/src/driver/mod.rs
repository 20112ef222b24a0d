//! Displax touch driver
//!
//! [`DisplaxTouch`] owns the transport, the receive buffer and the
//! connection state. All work happens inside [`DisplaxTouch::tick`], which
//! must be called periodically from the application loop:
//!
//! 1. Check the initialization timeout
//! 2. Pull every pending byte from the transport into the receive buffer
//! 3. Either decode one message or, while synchronizing, search for a
//!    touch report header
//!
//! Nothing blocks. Incomplete messages stay in the buffer until a later
//! tick brings the missing bytes.

mod decode;

use core::fmt;

use heapless::Vec;

use displax_hal::SerialTransport;
use displax_protocol::{
    BufferOverflow, Command, FrameSize, RxBuffer, TouchPoint, MAX_TOUCHES, RX_BUFFER_SIZE,
};

use crate::config::DriverConfig;
use crate::listeners::{ListenerId, ListenerRegistry, RegistryError, TouchListener};
use crate::log::{LogSink, Logger};
use crate::state::{ConnectionState, Event};

/// Receives connection state changes as `(new, previous)`
pub trait StateObserver {
    fn on_state_change(&self, new: ConnectionState, previous: ConnectionState);
}

impl<F> StateObserver for F
where
    F: Fn(ConnectionState, ConnectionState),
{
    fn on_state_change(&self, new: ConnectionState, previous: ConnectionState) {
        self(new, previous)
    }
}

/// Driver for a Displax touch controller on a serial transport
///
/// Callbacks are borrowed for `'a` and invoked synchronously from
/// [`tick`](Self::tick). They cannot call back into the driver.
pub struct DisplaxTouch<'a, T: SerialTransport> {
    transport: T,
    config: DriverConfig,
    state: ConnectionState,
    rx: RxBuffer<RX_BUFFER_SIZE>,
    touches: Vec<TouchPoint, MAX_TOUCHES>,
    scan_time: u16,
    frame_size: FrameSize,
    listeners: ListenerRegistry<'a>,
    state_observer: Option<&'a dyn StateObserver>,
    logger: Logger<'a>,
    /// Set while waiting for the RESET answer
    init_started_ms: Option<u32>,
}

impl<'a, T: SerialTransport> DisplaxTouch<'a, T> {
    /// Create a driver with the default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DriverConfig::default())
    }

    pub fn with_config(transport: T, config: DriverConfig) -> Self {
        Self {
            transport,
            config,
            state: ConnectionState::Disconnected,
            rx: RxBuffer::new(),
            touches: Vec::new(),
            scan_time: 0,
            frame_size: config.frame_size,
            listeners: ListenerRegistry::new(),
            state_observer: None,
            logger: Logger::new(),
            init_started_ms: None,
        }
    }

    /// Start the connection sequence
    ///
    /// Discards pending input, sends RESET and enters
    /// [`ConnectionState::Initializing`]. May be called again after
    /// [`ConnectionState::InitializationFailed`] to retry.
    pub fn start(&mut self, now_ms: u32) {
        self.info(format_args!("Initializing"));

        self.init_started_ms = Some(now_ms);
        self.discard_pending_input();
        self.rx.clear();

        self.apply(Event::Start);
        let _ = self.send_command(Command::Reset);
    }

    /// Process pending input
    ///
    /// `now_ms` is a monotonic millisecond timestamp; wrapping is handled.
    pub fn tick(&mut self, now_ms: u32) {
        self.check_init_timeout(now_ms);

        if self.receive().is_err() {
            return;
        }

        if self.state.is_resynchronizing() {
            self.synchronize();
        } else {
            self.decode(now_ms);
        }
    }

    /// Send a command to the sensor
    ///
    /// Responses are handled by [`tick`](Self::tick) like those of the
    /// initialization sequence.
    pub fn send_command(&mut self, command: Command) -> Result<(), T::Error> {
        let result = self
            .transport
            .write(&command.to_bytes())
            .and_then(|()| self.transport.flush());

        match &result {
            Ok(()) => self.info(format_args!("Sent command: {}", command)),
            Err(e) => self.warn(format_args!("Failed to send {}: {:?}", command, e)),
        }

        result
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Number of active touches in the last report
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Touch point by index, `None` past [`touch_count`](Self::touch_count)
    pub fn touch(&self, index: usize) -> Option<&TouchPoint> {
        self.touches.get(index)
    }

    /// Active touches from the last report, in slot order
    pub fn touches(&self) -> &[TouchPoint] {
        &self.touches
    }

    /// Scan time from the last report
    pub fn scan_time(&self) -> u16 {
        self.scan_time
    }

    pub fn is_touched(&self) -> bool {
        !self.touches.is_empty()
    }

    /// Forget the current touches
    ///
    /// Listeners and the last scan time are unaffected.
    pub fn clear_touches(&mut self) {
        self.touches.clear();
    }

    pub fn add_touch_listener(
        &mut self,
        listener: &'a dyn TouchListener,
    ) -> Result<ListenerId, RegistryError> {
        self.listeners.add(listener)
    }

    pub fn remove_touch_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Replace the log sink; `None` disables logging
    pub fn set_log_callback(&mut self, sink: Option<&'a dyn LogSink>) {
        self.logger.set_sink(sink);
    }

    /// Replace the state change observer; `None` disables notifications
    pub fn set_state_change_callback(&mut self, observer: Option<&'a dyn StateObserver>) {
        self.state_observer = observer;
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    pub fn frame_width(&self) -> u16 {
        self.frame_size.width
    }

    pub fn frame_height(&self) -> u16 {
        self.frame_size.height
    }

    /// Override the frame size, e.g. when the sensor never reports it
    pub fn set_frame_size(&mut self, width: u16, height: u16) {
        self.frame_size = FrameSize::new(width, height);
        self.info(format_args!("Frame size manually set to {} x {}", width, height));
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Bytes received but not yet decoded
    pub fn buffered(&self) -> &[u8] {
        self.rx.as_slice()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the driver and return the transport
    pub fn release(self) -> T {
        self.transport
    }

    fn check_init_timeout(&mut self, now_ms: u32) {
        if self.state != ConnectionState::Initializing {
            return;
        }

        if let Some(started) = self.init_started_ms {
            if now_ms.wrapping_sub(started) >= self.config.init_timeout_ms {
                self.warn(format_args!(
                    "Initialization timeout - no response from sensor in {} ms",
                    self.config.init_timeout_ms
                ));
                self.apply(Event::InitTimeout);
                self.init_started_ms = None;
            }
        }
    }

    /// Move pending transport bytes into the receive buffer
    ///
    /// On overflow the buffer is emptied and the driver resynchronizes.
    fn receive(&mut self) -> Result<(), BufferOverflow> {
        loop {
            match self.transport.available() {
                Ok(0) => return Ok(()),
                Ok(_) => {}
                Err(e) => {
                    self.warn(format_args!("Transport error: {:?}", e));
                    return Ok(());
                }
            }

            let byte = match self.transport.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => return Ok(()),
                Err(e) => {
                    self.warn(format_args!("Transport error: {:?}", e));
                    return Ok(());
                }
            };

            if let Err(overflow) = self.rx.push(byte) {
                self.warn(format_args!(
                    "RX buffer overflow, resetting and searching for frame header"
                ));
                self.rx.clear();
                self.apply(Event::SyncLost);
                return Err(overflow);
            }
        }
    }

    /// Drop whatever the transport already holds, at most one buffer's worth
    fn discard_pending_input(&mut self) {
        for _ in 0..RX_BUFFER_SIZE {
            match self.transport.available() {
                Ok(n) if n > 0 => {}
                _ => return,
            }
            match self.transport.read_byte() {
                Ok(Some(_)) => {}
                _ => return,
            }
        }
    }

    fn apply(&mut self, event: Event) {
        self.set_state(self.state.transition(event));
    }

    fn set_state(&mut self, new: ConnectionState) {
        let previous = self.state;
        if new == previous {
            return;
        }

        self.state = new;
        self.info(format_args!("State changed from {} to {}", previous, new));

        if let Some(observer) = self.state_observer {
            observer.on_state_change(new, previous);
        }
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.logger.info(args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.logger.warn(args);
    }
}
