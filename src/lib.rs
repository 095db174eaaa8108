//! # Interactive Time-Series Chart
//!
//! `timechart` is a desktop application for exploring a time series
//! interactively. It loads timestamped samples from an HTTP endpoint,
//! aggregates them into day/week/month/year buckets, renders the result as a
//! line chart, drills into a calendar year when a point is clicked, and
//! exports the rendered chart as a PNG.
//!
//! ## Features
//!
//! - Deterministic time-bucketed aggregation (day, ISO week, month, year)
//! - Drill-down from any aggregated point to its year's raw samples
//! - Pure view derivation: the raw sample cache is fetched once and only
//!   re-queried, never mutated
//! - Light/dark chart themes and PNG export
//!
//! ## Example
//!
//! ```no_run
//! use timechart::ChartApp;
//! use std::sync::{Arc, Mutex};
//! use eframe::NativeOptions;
//!
//! // Create a new application instance
//! let app = Arc::new(Mutex::new(ChartApp::default()));
//! let app_wrapper = timechart::app::AppWrapper { app };
//!
//! // Run the application with eframe
//! eframe::run_native(
//!     "Interactive Chart",
//!     NativeOptions::default(),
//!     Box::new(|_cc| Ok(Box::new(app_wrapper))),
//! ).unwrap();
//! ```
//!
//! The aggregation engine is usable on its own:
//!
//! ```
//! use timechart::aggregation::aggregate;
//! use timechart::types::{Granularity, Sample};
//!
//! let samples = vec![
//!     Sample { timestamp: "2023-01-01".into(), value: 10.0 },
//!     Sample { timestamp: "2023-01-02".into(), value: 5.0 },
//! ];
//! let monthly = aggregate(&samples, Granularity::Month).unwrap();
//! assert_eq!(monthly[0].timestamp, "2023-01");
//! assert_eq!(monthly[0].value, 15.0);
//! ```

pub mod aggregation;
pub mod app;
pub mod data;
pub mod error;
pub mod plotting;
pub mod types;

// Re-export main types for convenience
pub use app::App as ChartApp;
pub use error::{ChartError, Result};
pub use types::{AggregatedPoint, Granularity, Sample, ViewState};
