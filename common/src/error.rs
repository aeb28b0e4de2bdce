use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rejected query parameter. Raised before any upstream call is made.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx answer from the pricing API, carried verbatim.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
