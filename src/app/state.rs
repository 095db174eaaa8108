use eframe::App as EApp;
use egui::TextureHandle;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use crate::aggregation::{axis_sort_key, derive_view, label_year};
use crate::types::{AggregatedPoint, Granularity, Sample, ViewState};

/// Main application state
#[derive(Clone)]
pub struct App {
    /// URL of the JSON sample endpoint, editable in the UI
    pub data_url: String,
    /// Raw sample cache — written once per completed load, then only read
    pub samples: Vec<Sample>,
    /// Series currently shown on the chart, always derived from `samples`
    pub displayed: Vec<AggregatedPoint>,
    /// Display state the series was derived from
    pub view: ViewState,
    pub dark_mode: bool,
    pub plot_path: String,
    pub export_path: String,
    pub plot_texture: Option<TextureHandle>,
    pub update_needed: bool,
    pub is_loading: bool,
    /// Token of the most recently started fetch; completions carrying an
    /// older token are discarded so a superseded request can never overwrite
    /// newer data
    pub fetch_token: u64,
}

impl App {
    /// Mark a new fetch as in flight and return its token.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_token += 1;
        self.is_loading = true;
        self.fetch_token
    }

    /// Install freshly loaded samples and re-derive the displayed series.
    /// A stale token leaves everything untouched.
    pub fn apply_samples(&mut self, token: u64, samples: Vec<Sample>) {
        if token != self.fetch_token {
            debug!(token, current = self.fetch_token, "discarding stale fetch result");
            return;
        }
        self.samples = samples;
        self.is_loading = false;
        self.refresh_view();
    }

    /// A fetch failed: log happens at the call site, prior state stays as-is.
    pub fn fetch_failed(&mut self, token: u64) {
        if token == self.fetch_token {
            self.is_loading = false;
        }
    }

    /// Switch the aggregation granularity and re-derive the series. Also the
    /// only way back out of a drilled-down view.
    pub fn set_timeframe(&mut self, granularity: Granularity) {
        self.view = ViewState::Aggregated(granularity);
        self.refresh_view();
    }

    /// Handle a click on the chart point at `index`: drill into the year of
    /// its label. `index` counts along the chronologically sorted axis the
    /// chart draws, not the engine's first-seen emission order. Clicking
    /// while already drilled down re-filters with the freshly clicked year.
    pub fn point_clicked(&mut self, index: usize) {
        let mut labels: Vec<&str> = self.displayed.iter().map(|p| p.timestamp.as_str()).collect();
        labels.sort_by_key(|label| axis_sort_key(label));
        let Some(label) = labels.get(index) else {
            return;
        };
        let Some(year) = label_year(label) else {
            debug!(label = %label, "clicked label carries no year");
            return;
        };
        self.view = ViewState::DrilledDown(year);
        self.refresh_view();
    }

    /// Recompute `displayed` from the raw cache and the current view state.
    pub fn refresh_view(&mut self) {
        match derive_view(&self.samples, self.view) {
            Ok(points) => {
                self.displayed = points;
                self.update_needed = true;
            }
            Err(e) => {
                // Samples are validated at ingestion, so this only fires if
                // state was constructed by hand; keep the previous series.
                error!("failed to derive view: {}", e);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            data_url: "http://localhost:8080/data.json".to_string(),
            samples: Vec::new(),
            displayed: Vec::new(),
            view: ViewState::Aggregated(Granularity::Day),
            dark_mode: false,
            plot_path: "timechart_plot.png".to_string(),
            export_path: "chart.png".to_string(),
            plot_texture: None,
            update_needed: false,
            is_loading: false,
            fetch_token: 0,
        }
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            error!("failed to acquire app lock in update");
        }
    }
}
