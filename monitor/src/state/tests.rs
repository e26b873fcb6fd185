#![cfg(test)]

use definitions::Parameters;

use super::level::{clamp_distance, fill_percentage};
use super::parameters::{load_parameters_from_disk, save_parameters_to_disk};
use super::StateHandler;

const HEIGHT: f32 = 20.0;

#[test]
fn empty_when_distance_reaches_container_height() {
    assert_eq!(fill_percentage(HEIGHT, HEIGHT), 0.0);
    assert_eq!(fill_percentage(HEIGHT + 5.0, HEIGHT), 0.0);
}

#[test]
fn full_when_no_gap_remains() {
    assert_eq!(fill_percentage(0.0, HEIGHT), 100.0);
    assert_eq!(fill_percentage(-1.0, HEIGHT), 100.0);
}

#[test]
fn linear_in_between() {
    assert_eq!(fill_percentage(HEIGHT / 2.0, HEIGHT), 50.0);
    assert_eq!(fill_percentage(15.0, HEIGHT), 25.0);
}

#[test]
fn monotonically_decreasing_in_distance() {
    let mut last = 101.0;
    for tenth in 0..=200 {
        let pct = fill_percentage(tenth as f32 / 10.0, HEIGHT);
        assert!(pct < last, "fill must strictly decrease: {pct} !< {last}");
        last = pct;
    }
}

#[test]
fn clamps_out_of_range_readings() {
    assert_eq!(clamp_distance(401.3), 400.0);
    assert_eq!(clamp_distance(400.0), 400.0);
    assert_eq!(clamp_distance(-2.0), 0.0);
    assert_eq!(clamp_distance(123.5), 123.5);
}

#[test]
fn record_sample_updates_snapshot_and_clears_sensor_error() {
    let state_handler = StateHandler::new(Parameters::default());
    state_handler.record_sensor_error();
    assert!(state_handler.get_state().errors.sensor);

    state_handler.record_sample(5.0, 75.0);
    let state = state_handler.get_state();
    assert_eq!(state.distance_cm, 5.0);
    assert_eq!(state.fill_percentage, 75.0);
    assert_eq!(state.samples, 1);
    assert!(!state.errors.sensor);
}

#[test]
fn parameters_roundtrip_through_disk() {
    let dir = tempdir::TempDir::new("monitor_test").unwrap().into_path();
    let parameters = Parameters {
        container_height_cm: 35.0,
        full_threshold: 90.0,
        sample_interval_ms: 500,
    };
    save_parameters_to_disk(&parameters, &dir);
    assert_eq!(load_parameters_from_disk(&dir), parameters);
}

#[test]
fn corrupt_parameters_fall_back_to_defaults_and_get_backed_up() {
    let dir = tempdir::TempDir::new("monitor_test").unwrap().into_path();
    std::fs::write(dir.join("parameters.json"), "not json").unwrap();
    assert_eq!(load_parameters_from_disk(&dir), Parameters::default());
    assert!(dir.join("parameters.json.bak").exists());
}
