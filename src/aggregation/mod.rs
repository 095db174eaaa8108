//! Time-bucketing and aggregation engine.

pub mod bucket;
pub mod engine;


pub use bucket::{axis_sort_key, bucket_key, label_year, parse_timestamp};
pub use engine::{aggregate, aggregate_yearly, derive_view, drill_down, view_for_timeframe};
