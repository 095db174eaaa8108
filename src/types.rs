//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing raw samples, aggregated chart points, and display state.

use serde::{Deserialize, Serialize};

/// A single raw observation as delivered by the data source.
///
/// Samples are immutable once loaded; the full collection of samples is the
/// single source of truth and every displayed series is derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// ISO-8601 timestamp of the observation
    pub timestamp: String,
    /// Observed numeric value
    pub value: f64,
}

/// One point of an aggregated (or drilled-down) display series.
///
/// For aggregated views `timestamp` holds the bucket key (`2023-01-01`,
/// `2023-W5`, `2023-01`, or `2023` depending on granularity); for a
/// drilled-down view it holds the raw sample timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedPoint {
    /// Bucket key or raw timestamp labelling the point on the x axis
    pub timestamp: String,
    /// Sum of the sample values belonging to the bucket
    pub value: f64,
}

/// The bucket size driving aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Parse a UI selector string. Unknown selectors yield `None`; the
    /// timeframe dispatcher turns that into an empty series rather than an
    /// error.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Selector string for this granularity.
    pub fn as_selector(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Human-facing button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Daily",
            Self::Week => "Weekly",
            Self::Month => "Monthly",
            Self::Year => "Yearly",
        }
    }

    /// All granularities in button-bar order.
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];
}

/// What the chart is currently showing.
///
/// The raw sample cache plus a `ViewState` fully determine the displayed
/// series; every interaction re-derives the series from the cache instead of
/// mutating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Samples bucketed and summed at the given granularity
    Aggregated(Granularity),
    /// Raw samples filtered to a single calendar year after a point click
    DrilledDown(i32),
}

impl ViewState {
    /// Short label describing the view, used in the chart caption.
    pub fn description(&self) -> String {
        match self {
            ViewState::Aggregated(g) => format!("{} totals", g.label()),
            ViewState::DrilledDown(year) => format!("Samples in {}", year),
        }
    }
}
