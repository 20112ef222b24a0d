//! `embedded-io` transport adapter
//!
//! Wraps any UART that implements the `embedded-io` blocking traits plus
//! [`ReadReady`], which is enough to poll it without blocking.

use embedded_io::{Read, ReadReady, Write};

use crate::uart::SerialTransport;

/// [`SerialTransport`] over an `embedded-io` stream
#[derive(Debug)]
pub struct IoTransport<T> {
    inner: T,
}

impl<T> IoTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + ReadReady + Write> SerialTransport for IoTransport<T> {
    type Error = T::Error;

    /// `embedded-io` only tells whether at least one byte is ready, so this
    /// reports 0 or 1.
    fn available(&mut self) -> Result<usize, Self::Error> {
        Ok(usize::from(self.inner.read_ready()?))
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.inner.read_ready()? {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}
