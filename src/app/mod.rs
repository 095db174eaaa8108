//! egui application shell: shared state and UI drawing.

pub mod state;
pub mod ui;

pub use state::{App, AppWrapper};
