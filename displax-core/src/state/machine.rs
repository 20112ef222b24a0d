//! State machine definition

use core::fmt;

use super::events::Event;

/// Sensor connection and synchronization state
///
/// ```text
/// DISCONNECTED → INITIALIZING → CONNECTED → SYNCHRONIZED ⇄ SYNCHRONIZING
///                     │
///                     └→ INITIALIZATION_FAILED (timeout)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// Nothing sent yet
    #[default]
    Disconnected,
    /// RESET sent, waiting for the sensor to answer
    Initializing,
    /// RESET went unanswered
    InitializationFailed,
    /// Sensor answered RESET; configuration sequence in progress
    Connected,
    /// Searching for a touch report header after a decode failure
    Synchronizing,
    /// Processing touch reports normally
    Synchronized,
}

impl ConnectionState {
    /// Protocol-style name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "DISCONNECTED",
            ConnectionState::Initializing => "INITIALIZING",
            ConnectionState::InitializationFailed => "INITIALIZATION_FAILED",
            ConnectionState::Connected => "CONNECTED",
            ConnectionState::Synchronizing => "SYNCHRONIZING",
            ConnectionState::Synchronized => "SYNCHRONIZED",
        }
    }

    /// Incoming bytes go to the header search instead of the decoder
    pub fn is_resynchronizing(&self) -> bool {
        matches!(self, ConnectionState::Synchronizing)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use ConnectionState::*;
        use Event::*;

        match (self, event) {
            // Start may be reissued from any state, including after a failure
            (_, Start) => Initializing,

            (Initializing, InitTimeout) => InitializationFailed,

            // A RESET answer always means the sensor restarted
            (_, ResetAcknowledged) => Connected,

            (_, ReportingEnabled) => Synchronized,
            (_, SyncLost) => Synchronizing,

            (Synchronizing, HeaderFound) => Synchronized,

            // Default: stay in current state
            _ => self,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
