//! UART serial communication abstractions
//!
//! Provides the transport trait the touch driver polls from its tick.

/// Non-blocking serial transport
///
/// Implementations must never block in [`available`](Self::available) or
/// [`read_byte`](Self::read_byte). Writes are short (two-byte commands) and
/// may block until queued.
pub trait SerialTransport {
    /// Error type for transport operations
    type Error: core::fmt::Debug;

    /// Number of bytes that can be read without blocking
    fn available(&mut self) -> Result<usize, Self::Error>;

    /// Read a single byte
    ///
    /// Returns `Ok(None)` when no byte is pending.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write all of `data`
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered outgoing data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<T: SerialTransport + ?Sized> SerialTransport for &mut T {
    type Error = T::Error;

    fn available(&mut self) -> Result<usize, Self::Error> {
        (**self).available()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).read_byte()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// Line settings expected by Displax controllers (115200 8N1)
    pub const DISPLAX: UartConfig = UartConfig {
        baudrate: 115_200,
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::DISPLAX
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_115200_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }
}
