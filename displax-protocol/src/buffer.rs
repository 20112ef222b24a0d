//! Receive buffer for incoming UART bytes
//!
//! A bounded compacting queue: bytes are appended at the end and consumed
//! from the front, with the remainder shifted back to offset 0. The buffer
//! never holds more than its capacity; an append that does not fit is
//! rejected as a whole.

use heapless::Vec;

use crate::touch::TOUCH_HEADER;

/// Default receive buffer capacity in bytes
pub const RX_BUFFER_SIZE: usize = 2048;

/// An append would exceed the buffer capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferOverflow;

/// Bounded receive buffer
#[derive(Debug, Clone, Default)]
pub struct RxBuffer<const N: usize = RX_BUFFER_SIZE> {
    data: Vec<u8, N>,
}

impl<const N: usize> RxBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Append a single byte
    pub fn push(&mut self, byte: u8) -> Result<(), BufferOverflow> {
        self.data.push(byte).map_err(|_| BufferOverflow)
    }

    /// Append `bytes`, all or nothing
    ///
    /// On overflow the buffer is left untouched; the caller decides whether
    /// to clear it.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferOverflow> {
        self.data.extend_from_slice(bytes).map_err(|_| BufferOverflow)
    }

    /// Remove the first `count` bytes
    ///
    /// Consuming at least the current length empties the buffer.
    pub fn consume(&mut self, count: usize) {
        let len = self.data.len();
        if count >= len {
            self.data.clear();
            return;
        }

        self.data.copy_within(count.., 0);
        self.data.truncate(len - count);
    }

    /// Drop all buffered bytes
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Offset of the first occurrence of `pattern`
    pub fn find(&self, pattern: &[u8; 4]) -> Option<usize> {
        find_pattern(&self.data, pattern)
    }

    /// Buffered bytes, oldest first
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

/// Offset of the first touch report header in `data`
pub fn find_header(data: &[u8]) -> Option<usize> {
    find_pattern(data, &TOUCH_HEADER)
}

fn find_pattern(data: &[u8], pattern: &[u8; 4]) -> Option<usize> {
    // windows() yields nothing for fewer than 4 bytes
    data.windows(pattern.len()).position(|window| window == pattern)
}
