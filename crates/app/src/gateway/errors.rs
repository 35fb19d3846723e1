//! Gateway errors.

use marquee::promotions::wire::WireError;
use thiserror::Error;

/// Errors raised while fetching promotions.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("promotions request failed with status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,

        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("invalid promotions payload")]
    Payload(#[from] WireError),
}
