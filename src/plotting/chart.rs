use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use once_cell::sync::Lazy;

use crate::aggregation::axis_sort_key;
use crate::app::App;
use crate::plotting::styles::ChartTheme;

pub type PlotError = Box<dyn Error + Send + Sync>;

/// Fixed render geometry. The click-to-point mapping in [`point_index_at`]
/// depends on these staying in sync with the `ChartBuilder` setup below.
pub const PLOT_WIDTH: u32 = 640;
pub const PLOT_HEIGHT: u32 = 480;
pub const MARGIN: u32 = 10;
pub const LABEL_AREA: u32 = 50;

const CACHE_TTL: Duration = Duration::from_secs(300);

// Global render cache keyed by view, theme, and a hash of the series.
static PLOT_CACHE: Lazy<Mutex<LruCache<PlotCacheKey, (Vec<u8>, Instant)>>> =
    Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(10).unwrap())));

#[derive(Hash, Eq, PartialEq)]
struct PlotCacheKey {
    caption: String,
    dark_mode: bool,
    data_hash: u64,
}

impl PlotCacheKey {
    fn new(app: &App) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for point in &app.displayed {
            point.timestamp.hash(&mut hasher);
            point.value.to_bits().hash(&mut hasher);
        }

        Self {
            caption: app.view.description(),
            dark_mode: app.dark_mode,
            data_hash: hasher.finish(),
        }
    }
}

/// Render the current display series to `app.plot_path` as a PNG.
///
/// Recent identical renders are served from the LRU cache by rewriting the
/// cached bytes, so toggling between two views does not re-rasterize.
pub fn generate_plot(app: &App) -> Result<(), PlotError> {
    let cache_key = PlotCacheKey::new(app);

    if let Ok(mut cache) = PLOT_CACHE.lock() {
        if let Some((bytes, rendered_at)) = cache.get(&cache_key) {
            if rendered_at.elapsed() < CACHE_TTL {
                std::fs::write(&app.plot_path, bytes)?;
                return Ok(());
            }
        }
    }

    {
        let root =
            BitMapBackend::new(&app.plot_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        render_chart(app, &root)?;
        root.present()?;
    }

    let bytes = std::fs::read(&app.plot_path)?;
    if let Ok(mut cache) = PLOT_CACHE.lock() {
        cache.put(cache_key, (bytes, Instant::now()));
    }

    Ok(())
}

/// Draw the line chart for the app's displayed series onto a drawing area.
///
/// The series is sorted chronologically for the axis here; the aggregation
/// engine itself emits buckets in first-seen order.
pub fn render_chart(app: &App, root: &DrawingArea<BitMapBackend, Shift>) -> Result<(), PlotError> {
    let theme = ChartTheme::for_mode(app.dark_mode);
    root.fill(&theme.background_color)?;

    let mut series = app.displayed.clone();
    series.sort_by_key(|p| axis_sort_key(&p.timestamp));

    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let (min_val, max_val) = value_range(&values);
    let x_max = series.len().max(1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(
            app.view.description(),
            ("sans-serif", 30).into_font().color(&theme.text_color),
        )
        .margin(MARGIN)
        .set_all_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..x_max, min_val..max_val)?;

    // Show only a handful of x labels to prevent overlap.
    let labels: Vec<String> = series.iter().map(|p| p.timestamp.clone()).collect();
    let x_label_formatter = move |x: &f64| {
        let idx = *x as usize;
        if idx < labels.len() {
            if idx == 0
                || idx == labels.len() - 1
                || (idx % (labels.len() / 4).max(1) == 0 && idx > 0 && idx < labels.len() - 1)
            {
                labels[idx].clone()
            } else {
                String::new()
            }
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .y_desc("Value")
        .label_style(("sans-serif", 15).into_font().color(&theme.text_color))
        .x_label_formatter(&x_label_formatter)
        .x_label_style(
            ("sans-serif", 15)
                .into_font()
                .color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .y_label_formatter(&|y| {
            if y.abs() >= 1_000_000.0 {
                format!("{:.1}M", y / 1_000_000.0)
            } else if y.abs() >= 1_000.0 {
                format!("{:.1}K", y / 1_000.0)
            } else {
                format!("{:.0}", y)
            }
        })
        .draw()?;

    if series.is_empty() {
        return Ok(());
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    // Subtle glow under the main line.
    chart.draw_series(LineSeries::new(
        points.clone(),
        theme.glow_color.stroke_width(4),
    ))?;
    chart.draw_series(LineSeries::new(
        points.clone(),
        theme.line_color.stroke_width(2),
    ))?;

    // Markers make the clickable points visible.
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, theme.marker_color.filled())),
    )?;

    Ok(())
}

/// Copy the currently rendered chart PNG to the export path.
///
/// Pure rendering-surface capture: whatever `generate_plot` last wrote is
/// what gets exported.
pub fn export_plot(app: &App) -> std::io::Result<PathBuf> {
    std::fs::copy(&app.plot_path, &app.export_path)?;
    Ok(PathBuf::from(&app.export_path))
}

/// Map a click x position (relative to the rendered image) back to the index
/// of the nearest point on the chronologically sorted axis.
///
/// `rendered_width` is the on-screen width of the image, which egui may scale
/// away from [`PLOT_WIDTH`]. Clicks in the label areas return `None`.
pub fn point_index_at(rel_x: f32, rendered_width: f32, point_count: usize) -> Option<usize> {
    if point_count == 0 || rendered_width <= 0.0 {
        return None;
    }
    let px = rel_x / rendered_width * PLOT_WIDTH as f32;
    let left = (MARGIN + LABEL_AREA) as f32;
    let right = PLOT_WIDTH as f32 - left;
    if px < left || px > right {
        return None;
    }
    let index = ((px - left) / (right - left) * point_count as f32).round() as usize;
    Some(index.min(point_count - 1))
}

/// Y-axis range with headroom, clamping extreme outliers to the 95th
/// percentile scale so one spike does not flatten the rest of the series.
pub(crate) fn value_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min_val = sorted[0].min(0.0);
    // Percentile index must be able to exclude the top sample, otherwise
    // normal_max equals absolute_max and the clamp below never engages.
    let p95_idx = (((sorted.len() - 1) as f64 * 0.95) as usize)
        .min(sorted.len().saturating_sub(2));
    let normal_max = sorted[p95_idx];
    let absolute_max = sorted[sorted.len() - 1];

    let mut max_val = if normal_max > 0.0 && absolute_max > normal_max * 2.0 {
        normal_max * 1.2
    } else {
        absolute_max * 1.1
    };
    if max_val <= min_val {
        max_val = min_val + 1.0;
    }

    (min_val, max_val)
}
