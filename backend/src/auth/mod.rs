//! Authentication module
//!
//! A single shared API key guards the data API.

mod middleware;

pub use middleware::{require_api_key, API_KEY_HEADER};
