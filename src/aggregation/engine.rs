//! The aggregation engine: bucketed summation, year drill-down, and pure view
//! derivation.
//!
//! All functions here are pure over the raw sample slice. The app keeps one
//! cached sample array and re-runs these on every interaction; nothing in
//! this module mutates or caches anything itself.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::Datelike;

use crate::aggregation::bucket::{bucket_key, label_year, parse_timestamp};
use crate::error::Result;
use crate::types::{AggregatedPoint, Granularity, Sample, ViewState};

/// Group samples by bucket key and sum the values per bucket.
///
/// Buckets are emitted in the order their key is first encountered while
/// scanning `samples` left to right, and values accumulate in scan order
/// within each bucket. Intended for [`Granularity::Day`], [`Granularity::Week`]
/// and [`Granularity::Month`]; the yearly view has its own scan in
/// [`aggregate_yearly`].
pub fn aggregate(samples: &[Sample], granularity: Granularity) -> Result<Vec<AggregatedPoint>> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for sample in samples {
        let key = bucket_key(&sample.timestamp, granularity)?;
        match sums.entry(key) {
            Entry::Occupied(mut entry) => *entry.get_mut() += sample.value,
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(sample.value);
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|key| {
            let value = sums[&key];
            AggregatedPoint {
                timestamp: key,
                value,
            }
        })
        .collect())
}

/// Sum samples per calendar year.
///
/// Semantically a special case of [`aggregate`], kept as its own scan keyed
/// by the numeric year: the yearly view predates the general bucketing path
/// and drill-down shares its year derivation.
pub fn aggregate_yearly(samples: &[Sample]) -> Result<Vec<AggregatedPoint>> {
    let mut order: Vec<i32> = Vec::new();
    let mut sums: HashMap<i32, f64> = HashMap::new();

    for sample in samples {
        let year = parse_timestamp(&sample.timestamp)?.year();
        match sums.entry(year) {
            Entry::Occupied(mut entry) => *entry.get_mut() += sample.value,
            Entry::Vacant(entry) => {
                order.push(year);
                entry.insert(sample.value);
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|year| AggregatedPoint {
            timestamp: year.to_string(),
            value: sums[&year],
        })
        .collect())
}

/// Route a UI selector string to the matching aggregation routine.
///
/// Unknown selectors yield an empty series, not an error — the button bar is
/// the only producer of selectors and an unrecognized one should blank the
/// chart rather than crash it.
pub fn view_for_timeframe(selector: &str, samples: &[Sample]) -> Result<Vec<AggregatedPoint>> {
    match Granularity::from_selector(selector) {
        Some(Granularity::Year) => aggregate_yearly(samples),
        Some(granularity) => aggregate(samples, granularity),
        None => Ok(Vec::new()),
    }
}

/// Return the raw samples belonging to the calendar year of a clicked point.
///
/// The clicked label may come from any granularity; drilling down always
/// widens to the label's whole year (clicking a daily bucket selects its
/// year, not its day). Labels without a leading year, and samples whose
/// timestamps fail to parse, simply do not match. Never fails.
pub fn drill_down(clicked_label: &str, samples: &[Sample]) -> Vec<Sample> {
    let Some(year) = label_year(clicked_label) else {
        return Vec::new();
    };
    samples_in_year(samples, year)
}

fn samples_in_year(samples: &[Sample], year: i32) -> Vec<Sample> {
    samples
        .iter()
        .filter(|sample| {
            parse_timestamp(&sample.timestamp)
                .map(|instant| instant.year() == year)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Derive the displayed series from the raw cache and the display state.
///
/// This is the single entry point the app uses: `displayed =
/// derive_view(raw, view)`. Aggregated views run the bucketed sums;
/// a drilled-down view shows the year's raw samples as-is.
pub fn derive_view(samples: &[Sample], view: ViewState) -> Result<Vec<AggregatedPoint>> {
    match view {
        ViewState::Aggregated(Granularity::Year) => aggregate_yearly(samples),
        ViewState::Aggregated(granularity) => aggregate(samples, granularity),
        ViewState::DrilledDown(year) => Ok(samples_in_year(samples, year)
            .into_iter()
            .map(|sample| AggregatedPoint {
                timestamp: sample.timestamp,
                value: sample.value,
            })
            .collect()),
    }
}
