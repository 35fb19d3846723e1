//! Configuration
//!
//! Argument groups shared by the CLI commands. Every value can also come
//! from the environment or a `.env` file.

pub mod api;
pub mod display;
pub mod observability;

pub use api::ApiConfig;
pub use display::DisplayConfig;
pub use observability::{LogFormat, LoggingConfig};
