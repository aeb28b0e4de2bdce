pub mod error;
pub mod models;
pub mod presenter;
pub mod ratio;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
