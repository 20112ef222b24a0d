//! Displax UART Touch Protocol
//!
//! This crate defines the binary protocol spoken by Displax touch
//! controllers (Zeeto and compatible) over a UART link. It has no notion of
//! time or connection state; it only knows how bytes on the wire map to
//! commands, responses and touch frames.
//!
//! # Protocol Overview
//!
//! Every message starts with a 16-bit little-endian identifier. Command
//! responses carry a fixed-size payload that depends on the identifier.
//! Touch reports are fixed 72-byte frames:
//!
//! ```text
//! ┌─────────────┬──────────────────────────────────────────────┬─────────┐
//! │ HEADER      │ PAYLOAD                                      │ CRC32   │
//! │ 04 00 40 00 │ rsvd(1) + 6 × slot(10) + count(1) + scan(2)  │ LE, 4B  │
//! └─────────────┴──────────────────────────────────────────────┴─────────┘
//! ```
//!
//! The CRC covers the header and payload (68 bytes, 17 words).

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod command;
pub mod crc;
pub mod touch;

pub use buffer::{find_header, BufferOverflow, RxBuffer, RX_BUFFER_SIZE};
pub use command::{parse_frame_size, Command};
pub use crc::crc32;
pub use touch::{
    FrameSize, TouchPoint, TouchReport, TouchReportError, TouchSlot, MAX_TOUCHES,
    TOUCH_HEADER, TOUCH_HEADER_SIZE, TOUCH_PAYLOAD_SIZE, TOUCH_REPORT_SIZE,
};
