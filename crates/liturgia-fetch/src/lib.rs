pub mod error;
pub mod fetch;

pub use error::FetchError;
pub use fetch::{fetch, fetch_and_normalize, FetchConfig, DEFAULT_TIMEOUT, DEFAULT_URL};
