//! Display Controllers
//!
//! Timer-free state machines behind each promotional consumer. Callers own
//! the timers and tag their events with an [`Epoch`], so an event from a
//! timer that should already be gone is ignored.

pub mod poster;
pub mod rotation;
pub mod strip;

/// Generation of a controller's timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Epoch(u64);

impl Epoch {
    /// The following generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
