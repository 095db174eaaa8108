use std::fs;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use timechart::app::App;
use timechart::data::parse_payload;
use timechart::types::{Granularity, ViewState};

const PAYLOAD: &str = r#"[
    {"timestamp": "2023-01-01", "value": 10},
    {"timestamp": "2023-01-02", "value": 5},
    {"timestamp": "2023-06-15", "value": 20},
    {"timestamp": "2022-11-30T18:00:00Z", "value": 7.5}
]"#;

fn loaded_app(temp_dir: &TempDir) -> Arc<Mutex<App>> {
    let app = Arc::new(Mutex::new(App::default()));
    {
        let mut app = app.lock().unwrap();
        app.plot_path = temp_dir
            .path()
            .join("plot.png")
            .to_str()
            .unwrap()
            .to_string();
        app.export_path = temp_dir
            .path()
            .join("chart.png")
            .to_str()
            .unwrap()
            .to_string();

        let samples = parse_payload(PAYLOAD).unwrap();
        let token = app.begin_fetch();
        app.apply_samples(token, samples);
    }
    app
}

#[tokio::test]
async fn test_full_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let app = loaded_app(&temp_dir);

    // Load lands in the default daily view.
    {
        let app = app.lock().unwrap();
        assert_eq!(app.view, ViewState::Aggregated(Granularity::Day));
        assert_eq!(app.displayed.len(), 4);
        assert!(!app.is_loading);
    }

    // Walk through every timeframe; the raw cache stays put and the value
    // sum is conserved in each aggregated view.
    {
        let mut app = app.lock().unwrap();
        let raw_total: f64 = app.samples.iter().map(|s| s.value).sum();

        for granularity in Granularity::ALL {
            app.set_timeframe(granularity);
            let view_total: f64 = app.displayed.iter().map(|p| p.value).sum();
            assert!(
                (view_total - raw_total).abs() < 1e-9,
                "sum not conserved at {:?}",
                granularity
            );
            assert_eq!(app.samples.len(), 4);
        }
    }

    // Drill into 2023 via a simulated chart click on the yearly view.
    {
        let mut app = app.lock().unwrap();
        app.set_timeframe(Granularity::Year);
        // Chronological axis: index 0 is 2022, index 1 is 2023.
        app.point_clicked(1);
        assert_eq!(app.view, ViewState::DrilledDown(2023));
        assert_eq!(app.displayed.len(), 3);
        assert!(app
            .displayed
            .iter()
            .all(|p| p.timestamp.starts_with("2023")));

        // Re-selecting a timeframe leaves the drilled-down view.
        app.set_timeframe(Granularity::Month);
        assert_eq!(app.view, ViewState::Aggregated(Granularity::Month));
    }

    // Render the current view and export it.
    {
        let mut app = app.lock().unwrap();
        app.update_needed = false;
        assert!(timechart::plotting::generate_plot(&app).is_ok());
        assert!(fs::metadata(&app.plot_path).unwrap().len() > 0);

        let exported = timechart::plotting::export_plot(&app).unwrap();
        assert_eq!(
            fs::read(&app.plot_path).unwrap(),
            fs::read(&exported).unwrap()
        );
    }
}

#[tokio::test]
async fn test_failed_load_keeps_previous_state() {
    let temp_dir = TempDir::new().unwrap();
    let app = loaded_app(&temp_dir);

    let mut app = app.lock().unwrap();
    let samples_before = app.samples.clone();
    let displayed_before = app.displayed.clone();

    // A rejected payload never reaches the app; the load path just reports
    // failure for its token.
    assert!(parse_payload("{ not json").is_err());
    assert!(parse_payload(r#"[{"timestamp": "whenever", "value": 1}]"#).is_err());

    let token = app.begin_fetch();
    app.fetch_failed(token);

    assert!(!app.is_loading);
    assert_eq!(app.samples, samples_before);
    assert_eq!(app.displayed, displayed_before);
}

#[tokio::test]
async fn test_superseded_fetch_does_not_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let app = loaded_app(&temp_dir);

    let mut app = app.lock().unwrap();
    let first = app.begin_fetch();
    let second = app.begin_fetch();

    let fresh = parse_payload(r#"[{"timestamp": "2024-01-01", "value": 1}]"#).unwrap();
    app.apply_samples(second, fresh.clone());

    let stale = parse_payload(r#"[{"timestamp": "1999-01-01", "value": 9}]"#).unwrap();
    app.apply_samples(first, stale);

    assert_eq!(app.samples, fresh);
}
