//! Connection state machine
//!
//! Tracks the sensor lifecycle from reset through initialization to
//! synchronized touch streaming. Transitions are pure; the driver applies
//! them and notifies observers.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::ConnectionState;
