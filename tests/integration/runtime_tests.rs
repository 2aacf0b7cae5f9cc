//! Integration tests for `runtime::System` bootstrap and both scheduling
//! modes.  Task threads never exit; they are abandoned when the test ends.

use std::time::Duration as StdDuration;

use motordiag::app::output::OutputSink;
use motordiag::app::state::MotorSnapshot;
use motordiag::config::{DiagConfig, Scheduling};
use motordiag::error::Error;
use motordiag::runtime::System;

use crate::mock_hw::{RecordingDisplay, RecordingLog, fast_config, rig};

#[test]
fn boot_state_matches_config() {
    let r = rig(DiagConfig::default());
    assert_eq!(r.system.config(), &DiagConfig::default());
    assert_eq!(
        r.system.motor().snapshot(),
        MotorSnapshot { speed: 90, rpm: 2500 }
    );
    assert!(r.system.subsystems().ventilation_ok());
    assert_eq!(r.system.subsystems().fuel_level_percent(), 50.0);
    assert!(r.system.bus().ventilation.is_empty());
    assert!(r.system.bus().fuel.is_empty());
    assert!(r.system.bus().responses.is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let output = OutputSink::new(
        RecordingLog::default(),
        RecordingDisplay::default(),
        embassy_time::Duration::from_millis(100),
    );
    let config = DiagConfig {
        response_timeout_ms: 2000,
        ..DiagConfig::default()
    };
    assert!(matches!(System::new(config, output), Err(Error::Config(_))));
}

#[test]
fn threaded_mode_runs_all_tasks() {
    let r = rig(fast_config());
    let handles = r
        .system
        .start(r.sensor.clone(), r.indicator.clone())
        .unwrap();
    assert_eq!(handles.len(), 3);

    std::thread::sleep(StdDuration::from_millis(500));

    assert!(r.log.count("Checking motor...") >= 2);
    assert!(r.log.contains("Vent. Is ok"));
    assert!(r.log.contains("0x4: good fuel"));
    assert!(r.log.contains("Y*Y*"));
    assert!(r.log.contains("h$h$"));
}

#[test]
fn cooperative_mode_runs_all_tasks() {
    let config = DiagConfig {
        scheduling: Scheduling::Cooperative,
        ..fast_config()
    };
    let r = rig(config);
    r.sensor.set(3.0);

    let handles = r
        .system
        .start(r.sensor.clone(), r.indicator.clone())
        .unwrap();
    assert_eq!(handles.len(), 1);

    std::thread::sleep(StdDuration::from_millis(500));

    assert!(r.log.count("Checking motor...") >= 2);
    assert!(r.log.contains("0x3: low fuel"));
    assert!(r.log.contains("U$U$"));
    assert!(r.indicator.is_lit());
    assert!(r.display.shown("Fuel Level", "Low Fuel!"));
}

#[test]
fn motor_can_be_stopped_while_running() {
    let r = rig(fast_config());
    let _handles = r
        .system
        .start(r.sensor.clone(), r.indicator.clone())
        .unwrap();

    std::thread::sleep(StdDuration::from_millis(100));
    r.system.motor().set(0, 0);
    std::thread::sleep(StdDuration::from_millis(400));

    assert!(r.log.contains("M.G is ok, speed=90 rpm=2500"));
    assert!(r.log.contains("x01:Error: M.||Gb."));
}
