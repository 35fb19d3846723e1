//! Marquee application runtime.
//!
//! Holds the shared promotions store, the gateway that fills it from the
//! REST API and the components that turn it into banner, poster and strip
//! renders on a timer.

pub mod clock;
pub mod components;
pub mod config;
pub mod context;
pub mod gateway;
pub mod observability;
pub mod store;
pub mod timers;
