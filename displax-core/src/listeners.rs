//! Touch listener registry
//!
//! A fixed number of listeners can be registered. Each registration gets
//! an identifier that is never reused, so removal stays stable while the
//! backing storage compacts.

use heapless::Vec;

use displax_protocol::TouchPoint;

/// Maximum number of registered touch listeners
pub const MAX_LISTENERS: usize = 4;

/// Receives every decoded touch report
///
/// Called inline from [`DisplaxTouch::tick`](crate::DisplaxTouch::tick); a
/// slow listener stalls protocol processing. The slice is only valid for
/// the duration of the call.
pub trait TouchListener {
    fn on_touch(&self, touches: &[TouchPoint]);
}

impl<F> TouchListener for F
where
    F: Fn(&[TouchPoint]),
{
    fn on_touch(&self, touches: &[TouchPoint]) {
        self(touches)
    }
}

/// Handle returned by [`ListenerRegistry::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ListenerId(u32);

impl ListenerId {
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// All [`MAX_LISTENERS`] slots are taken
    Full,
}

/// Bounded, ordered set of touch listeners
pub struct ListenerRegistry<'a> {
    entries: Vec<(ListenerId, &'a dyn TouchListener), MAX_LISTENERS>,
    next_id: u32,
}

impl Default for ListenerRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ListenerRegistry<'a> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener
    ///
    /// Registering the same listener twice is allowed; it will then be
    /// notified twice.
    pub fn add(&mut self, listener: &'a dyn TouchListener) -> Result<ListenerId, RegistryError> {
        let id = ListenerId(self.next_id);
        self.entries
            .push((id, listener))
            .map_err(|_| RegistryError::Full)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    /// Remove a listener by identifier
    ///
    /// Returns true if a listener was removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                // Vec::remove shifts later entries down, keeping order
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Notify every listener, in registration order
    pub fn notify(&self, touches: &[TouchPoint]) {
        for (_, listener) in &self.entries {
            listener.on_touch(touches);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }
}
