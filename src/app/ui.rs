use egui::{Context, Sense};
use image::ImageReader;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use super::App;
use crate::data::fetch_samples;
use crate::plotting;
use crate::types::Granularity;

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: Arc<Mutex<App>>) {
    if app.dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }

    egui::TopBottomPanel::top("head").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Interactive Chart");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let icon = if app.dark_mode { "☀" } else { "🌙" };
                if ui.button(icon).clicked() {
                    app.dark_mode = !app.dark_mode;
                    app.update_needed = true;
                }
            });
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label("Data URL:");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut app.data_url);
            if ui.button("Load").clicked() && !app.is_loading {
                start_fetch(app, app_arc.clone(), ctx.clone());
            }
        });

        if app.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading data...");
            });
        }

        ui.separator();

        // Timeframe button bar; a change re-derives the view from the cached
        // samples, no refetch.
        ui.horizontal(|ui| {
            for granularity in Granularity::ALL {
                if ui.button(granularity.label()).clicked() {
                    app.set_timeframe(granularity);
                }
            }
        });

        ui.separator();

        if let Some(texture) = app.plot_texture.clone() {
            let response = ui
                .add(egui::Image::new(&texture).shrink_to_fit())
                .interact(Sense::click());
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let rel_x = pos.x - response.rect.left();
                    if let Some(index) = plotting::point_index_at(
                        rel_x,
                        response.rect.width(),
                        app.displayed.len(),
                    ) {
                        app.point_clicked(index);
                    }
                }
            }
        } else {
            ui.label("Load data to render the chart.");
        }

        ui.separator();

        if ui.button("Export as PNG").clicked() {
            match plotting::export_plot(app) {
                Ok(path) => info!(path = %path.display(), "chart exported"),
                Err(e) => error!("chart export failed: {}", e),
            }
        }
    });

    // Re-render the plot and swap the texture when the view changed.
    if app.update_needed {
        if let Err(e) = plotting::generate_plot(app) {
            error!("plotting error: {}", e);
        } else {
            load_plot_texture(app, ctx);
        }
        app.update_needed = false;
    }
}

/// Spawn the async data fetch and apply its outcome to the shared state.
///
/// Failures are logged and leave the previous samples untouched; a result
/// arriving for a superseded request is dropped by the token check in
/// [`App::apply_samples`].
fn start_fetch(app: &mut App, app_arc: Arc<Mutex<App>>, ctx: Context) {
    let url = app.data_url.clone();
    let token = app.begin_fetch();

    tokio::spawn(async move {
        match fetch_samples(&url).await {
            Ok(samples) => {
                if let Ok(mut app) = app_arc.lock() {
                    app.apply_samples(token, samples);
                }
            }
            Err(e) => {
                error!("error fetching data: {}", e);
                if let Ok(mut app) = app_arc.lock() {
                    app.fetch_failed(token);
                }
            }
        }
        ctx.request_repaint();
    });
}

fn load_plot_texture(app: &mut App, ctx: &Context) {
    match ImageReader::open(&app.plot_path).and_then(|reader| {
        reader
            .decode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }) {
        Ok(image) => {
            let size = [image.width() as usize, image.height() as usize];
            let pixels = image.to_rgba8();
            let pixels = pixels.as_flat_samples();
            let texture = ctx.load_texture(
                "plot_texture",
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
                egui::TextureOptions::LINEAR,
            );
            app.plot_texture = Some(texture);
        }
        Err(e) => error!("failed to load plot image: {}", e),
    }
}
