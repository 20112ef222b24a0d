//! Displax Hardware Abstraction Layer
//!
//! This crate defines the transport the touch driver talks through. The
//! driver never blocks: it asks how many bytes are pending, reads them one
//! at a time, and writes short commands followed by a flush.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  displax-core (DisplaxTouch driver)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  displax-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  IoTransport  │       │ board-specific│
//! │ (embedded-io) │       │   UART impl   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::SerialTransport`] - Non-blocking byte-oriented duplex channel

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key types at crate root for convenience
pub use io::IoTransport;
pub use uart::{DataBits, Parity, SerialTransport, StopBits, UartConfig};
