use syncthru::monitor::Monitor;
use syncthru::sensor::{SensorKind, SensorValue, build_sensors};
use syncthru::source::StatusSource;
use syncthru::status::{StatusSnapshot, TonerColor};

fn snapshot(json: &str) -> StatusSnapshot {
    StatusSnapshot::from_json(json).unwrap_or_else(|e| panic!("Bad test snapshot: {}", e))
}

fn kinds(snapshot: &StatusSnapshot) -> Vec<SensorKind> {
    build_sensors(snapshot, "Office")
        .iter()
        .map(|sensor| sensor.kind())
        .collect()
}

/// Hands out a fixed sequence of snapshots, then fails.
struct QueueSource {
    snapshots: Vec<StatusSnapshot>,
}

impl QueueSource {
    fn new(snapshots: Vec<StatusSnapshot>) -> Self {
        QueueSource { snapshots }
    }
}

impl StatusSource for QueueSource {
    fn poll(&mut self) -> Result<StatusSnapshot, Box<dyn std::error::Error>> {
        if self.snapshots.is_empty() {
            return Err("No more snapshots".into());
        }
        Ok(self.snapshots.remove(0))
    }
}

#[test]
fn test_empty_snapshot_yields_only_main() {
    assert_eq!(kinds(&snapshot("{}")), vec![SensorKind::Main]);
}

#[test]
fn test_catalog_matches_reported_components() {
    let snap = snapshot(
        r#"{
            "serial_number": "SN1",
            "toner": {"black": {"remaining": 42}},
            "drum": {},
            "input_trays": {"1": {"newError": ""}},
            "output_trays": {"0": {"status": "jam"}}
        }"#,
    );
    assert_eq!(
        kinds(&snap),
        vec![
            SensorKind::Main,
            SensorKind::Toner(TonerColor::Black),
            SensorKind::InputTray(1),
            SensorKind::OutputTray(0),
        ]
    );
}

#[test]
fn test_catalog_is_idempotent() {
    let snap = snapshot(
        r#"{
            "toner": {"black": {"remaining": 42}, "cyan": {"remaining": 9}},
            "drum": {"black": {"remaining": 88}},
            "input_trays": {"1": {"newError": ""}, "4": {"newError": ""}},
            "output_trays": {"0": {}}
        }"#,
    );
    assert_eq!(build_sensors(&snap, "Office"), build_sensors(&snap, "Office"));
}

#[test]
fn test_colors_and_trays_come_out_in_fixed_order() {
    let snap = snapshot(
        r#"{
            "toner": {
                "yellow": {"remaining": 1},
                "black": {"remaining": 2},
                "magenta": {"remaining": 3}
            },
            "input_trays": {"5": {"newError": ""}, "2": {"newError": ""}}
        }"#,
    );
    assert_eq!(
        kinds(&snap),
        vec![
            SensorKind::Main,
            SensorKind::Toner(TonerColor::Black),
            SensorKind::Toner(TonerColor::Magenta),
            SensorKind::Toner(TonerColor::Yellow),
            SensorKind::InputTray(2),
            SensorKind::InputTray(5),
        ]
    );
}

#[test]
fn test_empty_entries_are_not_supported() {
    let snap = snapshot(
        r#"{
            "toner": {"black": {}},
            "drum": {"cyan": {}},
            "input_trays": {"1": {}}
        }"#,
    );
    assert_eq!(kinds(&snap), vec![SensorKind::Main]);
}

// The supported-filter is deliberately NOT applied to output trays: every
// present key gets a sensor, populated or not. Inherited behavior, kept
// as observed.
#[test]
fn test_output_trays_skip_supported_filter() {
    let snap = snapshot(r#"{"output_trays": {"0": {}, "3": {}}}"#);
    assert_eq!(
        kinds(&snap),
        vec![
            SensorKind::Main,
            SensorKind::OutputTray(0),
            SensorKind::OutputTray(3),
        ]
    );
}

#[test]
fn test_trays_outside_known_range_are_ignored() {
    let snap = snapshot(
        r#"{
            "input_trays": {"0": {"newError": ""}, "6": {"newError": ""}},
            "output_trays": {"6": {"status": ""}}
        }"#,
    );
    assert_eq!(kinds(&snap), vec![SensorKind::Main]);
}

#[test]
fn test_monitor_catalog_is_frozen_at_setup() {
    let first = snapshot(r#"{"toner": {"black": {"remaining": 42}}}"#);
    let second = snapshot(
        r#"{
            "toner": {"black": {"remaining": 41}, "cyan": {"remaining": 99}},
            "drum": {"black": {"remaining": 80}}
        }"#,
    );
    let mut monitor = Monitor::new(QueueSource::new(vec![first, second]), "Office").unwrap();
    let before: Vec<SensorKind> = monitor.sensors().iter().map(|s| s.kind()).collect();

    monitor.refresh().unwrap();

    let after: Vec<SensorKind> = monitor.sensors().iter().map(|s| s.kind()).collect();
    assert_eq!(before, after, "Refresh must not re-catalog");
    assert_eq!(
        after,
        vec![SensorKind::Main, SensorKind::Toner(TonerColor::Black)]
    );

    // Values do follow the refreshed snapshot.
    let readings = monitor.readings();
    let toner = readings
        .iter()
        .find(|r| r.name == "Office Toner black")
        .unwrap();
    assert_eq!(toner.value, Some(SensorValue::Number(41)));
}

#[test]
fn test_monitor_keeps_snapshot_when_refresh_fails() {
    let only = snapshot(r#"{"toner": {"black": {"remaining": 42}}}"#);
    let mut monitor = Monitor::new(QueueSource::new(vec![only]), "Office").unwrap();

    let result = monitor.refresh();
    assert!(result.is_err());
    let error_msg = format!("{}", result.err().unwrap());
    assert!(error_msg.contains("No more snapshots"));

    let readings = monitor.readings();
    let toner = readings
        .iter()
        .find(|r| r.name == "Office Toner black")
        .unwrap();
    assert_eq!(toner.value, Some(SensorValue::Number(42)));
}

#[test]
fn test_readings_all_observe_the_same_snapshot() {
    let snap = snapshot(
        r#"{
            "serial_number": "SN1",
            "device_status": 3,
            "toner": {"black": {"remaining": 42}},
            "input_trays": {"1": {"newError": ""}},
            "output_trays": {"0": {"status": "jam"}}
        }"#,
    );
    let monitor = Monitor::new(QueueSource::new(vec![snap]), "Office").unwrap();

    let readings = monitor.readings();
    assert_eq!(readings.len(), monitor.sensors().len());
    for (sensor, reading) in monitor.sensors().iter().zip(&readings) {
        assert_eq!(reading.value, sensor.value(monitor.snapshot()));
        assert_eq!(reading.unique_id, sensor.unique_id(monitor.snapshot()));
    }
}
