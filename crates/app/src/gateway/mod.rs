//! Remote Fetch Gateway

mod errors;
mod service;
mod source;

pub use errors::GatewayError;
pub use service::{FetchOutcome, PromotionsGateway, RetryPolicy};
pub use source::{HttpPromotionsSource, MockPromotionsSource, PromotionsSource};
