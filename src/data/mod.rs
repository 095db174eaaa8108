//! Data loading from the HTTP sample source.

mod fetch;

pub use fetch::{fetch_samples, parse_payload, validate_samples};
