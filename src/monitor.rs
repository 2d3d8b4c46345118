use crate::sensor::{Reading, Sensor, build_sensors};
use crate::source::StatusSource;
use crate::status::StatusSnapshot;

/// One monitored printer: a status source, the sensor set derived from its
/// first snapshot, and the latest snapshot.
///
/// The sensor set is computed once at construction and never re-cataloged;
/// a refresh only swaps the snapshot, so every reading taken between two
/// refreshes observes the same snapshot instance.
pub struct Monitor<S: StatusSource> {
    source: S,
    name: String,
    sensors: Vec<Sensor>,
    snapshot: StatusSnapshot,
}

impl<S: StatusSource> Monitor<S> {
    /// Poll once and enumerate the printer's sensors from that snapshot.
    pub fn new(mut source: S, name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let snapshot = source.poll()?;
        let sensors = build_sensors(&snapshot, name);
        Ok(Monitor {
            source,
            name: name.to_string(),
            sensors,
            snapshot,
        })
    }

    /// Poll for a fresh snapshot. On failure the previous snapshot stays
    /// in place and the error is returned to the caller.
    pub fn refresh(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.snapshot = self.source.poll()?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    /// Evaluate every sensor against the current snapshot.
    pub fn readings(&self) -> Vec<Reading> {
        self.sensors
            .iter()
            .map(|sensor| sensor.reading(&self.snapshot))
            .collect()
    }
}
