//! Displax touch controller driver
//!
//! This crate contains everything above the wire format:
//!
//! - Connection state machine (reset, initialization chain, resync)
//! - Message dispatch and frame synchronization
//! - Touch listener registry and state change notifications
//! - Log records for diagnostics
//! - Driver configuration
//!
//! # Example
//!
//! ```ignore
//! let on_touch = |touches: &[TouchPoint]| {
//!     for touch in touches {
//!         // touch.id, touch.x, touch.y ...
//!     }
//! };
//!
//! let mut touch = DisplaxTouch::new(uart);
//! touch.add_touch_listener(&on_touch).ok();
//! touch.start(now_ms());
//!
//! loop {
//!     touch.tick(now_ms());
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod driver;
pub mod listeners;
pub mod log;
pub mod state;

pub use config::DriverConfig;
pub use driver::{DisplaxTouch, StateObserver};
pub use listeners::{ListenerId, ListenerRegistry, RegistryError, TouchListener, MAX_LISTENERS};
pub use log::{LogLevel, LogSink, Logger};
pub use state::{ConnectionState, Event};

pub use displax_hal::SerialTransport;
pub use displax_protocol::{Command, FrameSize, TouchPoint};
