//! Driver configuration
//!
//! Defaults match what Displax controllers expect out of the box. The
//! struct is optionally serde-serializable so board configs can carry it.

use displax_protocol::FrameSize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time allowed for the sensor to answer RESET
pub const DEFAULT_INIT_TIMEOUT_MS: u32 = 1000;

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Initialization timeout in milliseconds, measured from `start`
    pub init_timeout_ms: u32,
    /// Frame size assumed until the sensor reports its own
    pub frame_size: FrameSize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            init_timeout_ms: DEFAULT_INIT_TIMEOUT_MS,
            frame_size: FrameSize::DEFAULT,
        }
    }
}

impl DriverConfig {
    pub fn with_init_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.init_timeout_ms = timeout_ms;
        self
    }

    pub fn with_frame_size(mut self, width: u16, height: u16) -> Self {
        self.frame_size = FrameSize::new(width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.init_timeout_ms, 1000);
        assert_eq!(config.frame_size, FrameSize::new(1050, 650));
    }

    #[test]
    fn test_builder() {
        let config = DriverConfig::default()
            .with_init_timeout_ms(250)
            .with_frame_size(1920, 1080);
        assert_eq!(config.init_timeout_ms, 250);
        assert_eq!(config.frame_size.width, 1920);
        assert_eq!(config.frame_size.height, 1080);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_roundtrip() {
        let config = DriverConfig::default().with_frame_size(800, 480);
        let mut buf = [0u8; 32];
        let encoded = postcard::to_slice(&config, &mut buf).unwrap();
        let decoded: DriverConfig = postcard::from_bytes(encoded).unwrap();
        assert_eq!(decoded, config);
    }
}
