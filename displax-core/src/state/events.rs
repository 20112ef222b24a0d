//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Application started the connection sequence (RESET sent)
    Start,
    /// Sensor answered RESET
    ResetAcknowledged,
    /// No answer to RESET within the initialization timeout
    InitTimeout,

    // Streaming events
    /// Sensor confirmed ENABLE_REPORTING
    ReportingEnabled,
    /// Decode failure, unknown identifier or buffer overflow
    SyncLost,
    /// Touch report header located at the start of the buffer
    HeaderFound,
}
