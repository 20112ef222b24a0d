//! Driver log records
//!
//! Diagnostics are pre-formatted into a bounded buffer and handed to a
//! single optional sink. With the `defmt` feature they are also emitted
//! through defmt.

use core::fmt::{self, Write};

use heapless::String;

/// Log messages longer than this are truncated
pub const LOG_BUFFER_SIZE: usize = 128;

/// Log message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Info,
    Warn,
}

/// Receives driver log records
pub trait LogSink {
    fn log(&self, level: LogLevel, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(LogLevel, &str),
{
    fn log(&self, level: LogLevel, message: &str) {
        self(level, message)
    }
}

/// Single-slot log dispatcher
#[derive(Clone, Copy, Default)]
pub struct Logger<'a> {
    sink: Option<&'a dyn LogSink>,
}

impl<'a> Logger<'a> {
    pub const fn new() -> Self {
        Self { sink: None }
    }

    /// Replace the sink; `None` disables logging
    pub fn set_sink(&mut self, sink: Option<&'a dyn LogSink>) {
        self.sink = sink;
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, args);
    }

    fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if cfg!(not(feature = "defmt")) && self.sink.is_none() {
            return;
        }

        let message = format_message(args);

        #[cfg(feature = "defmt")]
        {
            match level {
                LogLevel::Info => defmt::info!("{=str}", message.as_str()),
                LogLevel::Warn => defmt::warn!("{=str}", message.as_str()),
            }
        }

        if let Some(sink) = self.sink {
            sink.log(level, &message);
        }
    }
}

/// Format `args`, keeping as many whole characters as fit
pub fn format_message(args: fmt::Arguments<'_>) -> String<LOG_BUFFER_SIZE> {
    let mut message = String::new();
    let _ = Truncating(&mut message).write_fmt(args);
    message
}

struct Truncating<'s, const N: usize>(&'s mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
