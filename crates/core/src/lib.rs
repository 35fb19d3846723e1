//! Marquee
//!
//! Marquee selects, orders and rotates storefront promotions: which banner a
//! slot shows at an instant on a given device, how a rotating banner cycles,
//! and when a floating poster appears and goes away.
//!
//! Everything in this crate is synchronous and side-effect free. Timers,
//! network access and shared state live in the application crate.

pub mod device;
pub mod display;
pub mod fixtures;
pub mod prelude;
pub mod promotions;
pub mod timing;
pub mod view;
