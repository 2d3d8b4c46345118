use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use crate::status::{StatusFields, StatusSnapshot, TONER_COLORS, TonerColor};

/// Icon shared by every sensor of this integration.
pub const ICON: &str = "mdi:printer";

/// Unit for toner and drum fill levels.
pub const PERCENTAGE: &str = "%";

/// Input tray numbers known models can report.
pub const INPUT_TRAYS: RangeInclusive<u8> = 1..=5;

/// Output tray numbers known models can report.
pub const OUTPUT_TRAYS: RangeInclusive<u8> = 0..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Main,
    Toner(TonerColor),
    Drum(TonerColor),
    InputTray(u8),
    OutputTray(u8),
}

/// A published sensor value: fill levels are numeric, states are text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Number(n) => write!(f, "{}", n),
            SensorValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Static identity plus extraction rule for one sensor.
///
/// Created once per printer by [`build_sensors`]; evaluation methods are
/// pure reads of whatever snapshot the caller passes in, so values are
/// recomputed on every refresh tick and never cached here.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    kind: SensorKind,
    name: String,
    id_suffix: String,
    unit: Option<&'static str>,
}

impl Sensor {
    pub fn new(kind: SensorKind, base_name: &str) -> Self {
        let (name, id_suffix, unit) = match kind {
            SensorKind::Main => (base_name.to_string(), "_main".to_string(), None),
            SensorKind::Toner(color) => (
                format!("{} Toner {}", base_name, color),
                format!("_toner_{}", color),
                Some(PERCENTAGE),
            ),
            SensorKind::Drum(color) => (
                format!("{} Drum {}", base_name, color),
                format!("_drum_{}", color),
                Some(PERCENTAGE),
            ),
            SensorKind::InputTray(tray) => (
                format!("{} Tray {}", base_name, tray),
                format!("_tray_{}", tray),
                None,
            ),
            SensorKind::OutputTray(tray) => (
                format!("{} Output Tray {}", base_name, tray),
                format!("_output_tray_{}", tray),
                None,
            ),
        };
        Sensor {
            kind,
            name,
            id_suffix,
            unit,
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &'static str {
        ICON
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.unit
    }

    /// The main sensor is opt-in; everything else is visible by default.
    pub fn enabled_by_default(&self) -> bool {
        !matches!(self.kind, SensorKind::Main)
    }

    /// Serial-derived unique id, or `None` while the snapshot has no
    /// serial number. Identity is undefined then, not an error.
    pub fn unique_id(&self, snapshot: &StatusSnapshot) -> Option<String> {
        snapshot
            .serial_number()
            .map(|serial| format!("{}{}", serial, self.id_suffix))
    }

    pub fn device_identifiers(
        &self,
        snapshot: &StatusSnapshot,
    ) -> Option<BTreeSet<(String, String)>> {
        crate::device_identifiers(snapshot)
    }

    pub fn value(&self, snapshot: &StatusSnapshot) -> Option<SensorValue> {
        match self.kind {
            SensorKind::Main => Some(SensorValue::Text(
                snapshot.device_status().label().to_string(),
            )),
            SensorKind::Toner(color) => supply_level(snapshot.toner_status().get(&color)),
            SensorKind::Drum(color) => supply_level(snapshot.drum_status().get(&color)),
            SensorKind::InputTray(tray) => {
                tray_state(snapshot.input_tray_status().get(&tray), "newError")
            }
            SensorKind::OutputTray(tray) => {
                tray_state(snapshot.output_tray_status().get(&tray), "status")
            }
        }
    }

    /// The full sub-status entry for this sensor, or an empty map when the
    /// key is gone from the latest snapshot.
    pub fn attributes(&self, snapshot: &StatusSnapshot) -> StatusFields {
        match self.kind {
            SensorKind::Main => {
                let mut fields = StatusFields::new();
                fields.insert(
                    "display_text".to_string(),
                    snapshot.device_status_details().into(),
                );
                fields
            }
            SensorKind::Toner(color) => cloned_entry(snapshot.toner_status().get(&color)),
            SensorKind::Drum(color) => cloned_entry(snapshot.drum_status().get(&color)),
            SensorKind::InputTray(tray) => cloned_entry(snapshot.input_tray_status().get(&tray)),
            SensorKind::OutputTray(tray) => cloned_entry(snapshot.output_tray_status().get(&tray)),
        }
    }

    pub fn reading(&self, snapshot: &StatusSnapshot) -> Reading {
        Reading {
            name: self.name.clone(),
            unique_id: self.unique_id(snapshot),
            value: self.value(snapshot),
            unit: self.unit,
            icon: ICON,
            enabled_by_default: self.enabled_by_default(),
            attributes: self.attributes(snapshot),
        }
    }
}

/// One evaluated row, ready to hand to whatever publishes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub name: String,
    pub unique_id: Option<String>,
    pub value: Option<SensorValue>,
    pub unit: Option<&'static str>,
    pub icon: &'static str,
    pub enabled_by_default: bool,
    pub attributes: StatusFields,
}

/// Enumerate the sensors one printer supports, from its setup-time snapshot.
///
/// The set is fixed here once; later snapshots change values, never the
/// catalog. Toner, drum, and input tray sensors require a populated entry,
/// while output trays are listed for every present key even when the entry
/// is empty, matching how the status clients report them.
pub fn build_sensors(snapshot: &StatusSnapshot, name: &str) -> Vec<Sensor> {
    let mut sensors = vec![Sensor::new(SensorKind::Main, name)];

    for color in TONER_COLORS {
        if is_supported(snapshot.toner_status().get(&color)) {
            sensors.push(Sensor::new(SensorKind::Toner(color), name));
        }
    }
    for color in TONER_COLORS {
        if is_supported(snapshot.drum_status().get(&color)) {
            sensors.push(Sensor::new(SensorKind::Drum(color), name));
        }
    }
    for tray in INPUT_TRAYS {
        if is_supported(snapshot.input_tray_status().get(&tray)) {
            sensors.push(Sensor::new(SensorKind::InputTray(tray), name));
        }
    }
    for tray in OUTPUT_TRAYS {
        if snapshot.output_tray_status().contains_key(&tray) {
            sensors.push(Sensor::new(SensorKind::OutputTray(tray), name));
        }
    }

    sensors
}

fn is_supported(entry: Option<&StatusFields>) -> bool {
    entry.is_some_and(|fields| !fields.is_empty())
}

fn cloned_entry(entry: Option<&StatusFields>) -> StatusFields {
    entry.cloned().unwrap_or_default()
}

fn supply_level(entry: Option<&StatusFields>) -> Option<SensorValue> {
    entry?
        .get("remaining")
        .and_then(serde_json::Value::as_i64)
        .map(SensorValue::Number)
}

// A blank state string means the tray is fine; anything else is the
// printer's error text, passed through unchanged.
fn tray_state(entry: Option<&StatusFields>, field: &str) -> Option<SensorValue> {
    let state = entry?.get(field).and_then(serde_json::Value::as_str)?;
    if state.is_empty() {
        Some(SensorValue::Text("Ready".to_string()))
    } else {
        Some(SensorValue::Text(state.to_string()))
    }
}
