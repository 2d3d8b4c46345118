use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Open field map for one sub-status entry, as exported by the status client.
pub type StatusFields = BTreeMap<String, serde_json::Value>;

/// Overall device status code.
///
/// The wire form is the status client's integer code (1..=7); anything else
/// is rejected when the snapshot is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DeviceStatus {
    Invalid,
    Offline,
    Normal,
    #[default]
    Unknown,
    Warning,
    Testing,
    Error,
}

impl DeviceStatus {
    /// Human-readable label for the status code.
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Invalid => "invalid",
            DeviceStatus::Offline => "unreachable",
            DeviceStatus::Normal => "normal",
            DeviceStatus::Unknown => "unknown",
            DeviceStatus::Warning => "warning",
            DeviceStatus::Testing => "testing",
            DeviceStatus::Error => "error",
        }
    }
}

impl TryFrom<u8> for DeviceStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, String> {
        match code {
            1 => Ok(DeviceStatus::Invalid),
            2 => Ok(DeviceStatus::Offline),
            3 => Ok(DeviceStatus::Normal),
            4 => Ok(DeviceStatus::Unknown),
            5 => Ok(DeviceStatus::Warning),
            6 => Ok(DeviceStatus::Testing),
            7 => Ok(DeviceStatus::Error),
            _ => Err(format!("Unknown device status code: {}", code)),
        }
    }
}

impl From<DeviceStatus> for u8 {
    fn from(status: DeviceStatus) -> u8 {
        match status {
            DeviceStatus::Invalid => 1,
            DeviceStatus::Offline => 2,
            DeviceStatus::Normal => 3,
            DeviceStatus::Unknown => 4,
            DeviceStatus::Warning => 5,
            DeviceStatus::Testing => 6,
            DeviceStatus::Error => 7,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Toner and drum slots on color-capable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TonerColor {
    Black,
    Cyan,
    Magenta,
    Yellow,
}

pub const TONER_COLORS: [TonerColor; 4] = [
    TonerColor::Black,
    TonerColor::Cyan,
    TonerColor::Magenta,
    TonerColor::Yellow,
];

impl fmt::Display for TonerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TonerColor::Black => write!(f, "black"),
            TonerColor::Cyan => write!(f, "cyan"),
            TonerColor::Magenta => write!(f, "magenta"),
            TonerColor::Yellow => write!(f, "yellow"),
        }
    }
}

/// One immutable read of the printer's full status.
///
/// Replaced wholesale on every successful poll; never mutated in place.
/// Every section is optional on the wire, so `{}` parses as an empty
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusSnapshot {
    device_status: DeviceStatus,
    device_status_details: String,
    serial_number: Option<String>,
    toner: BTreeMap<TonerColor, StatusFields>,
    drum: BTreeMap<TonerColor, StatusFields>,
    input_trays: BTreeMap<u8, StatusFields>,
    output_trays: BTreeMap<u8, StatusFields>,
}

impl StatusSnapshot {
    /// Parse a snapshot from the status client's JSON export.
    pub fn from_json(data: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn device_status(&self) -> DeviceStatus {
        self.device_status
    }

    /// Message currently shown on the printer's display.
    pub fn device_status_details(&self) -> &str {
        &self.device_status_details
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn toner_status(&self) -> &BTreeMap<TonerColor, StatusFields> {
        &self.toner
    }

    pub fn drum_status(&self) -> &BTreeMap<TonerColor, StatusFields> {
        &self.drum
    }

    /// Input tray entries, keyed by tray number (1..=5 on known models).
    pub fn input_tray_status(&self) -> &BTreeMap<u8, StatusFields> {
        &self.input_trays
    }

    /// Output tray entries, keyed by tray number (0..=5 on known models).
    pub fn output_tray_status(&self) -> &BTreeMap<u8, StatusFields> {
        &self.output_trays
    }
}
