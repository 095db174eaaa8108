//! Chart rendering with plotters and PNG export.

mod chart;
mod styles;


pub use chart::{
    export_plot, generate_plot, point_index_at, render_chart, PlotError, LABEL_AREA, MARGIN,
    PLOT_HEIGHT, PLOT_WIDTH,
};
pub use styles::ChartTheme;
