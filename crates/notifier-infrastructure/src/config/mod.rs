mod api;

pub use api::{ApiConfig, DEFAULT_API_BASE};
