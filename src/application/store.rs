// Dashboard state store - all mutation goes through these transitions
use crate::domain::diagnostics::DiagnosticCode;
use crate::domain::history::{HistorySeries, SamplePoint};
use crate::domain::position::Position;
use crate::domain::sensors::SensorReading;
use crate::domain::trips::{self, TripRecord};
use std::collections::BTreeMap;

/// The single application-state object behind the dashboard. The polling
/// component is the only writer; views read a consistent snapshot of it.
#[derive(Debug)]
pub struct DashboardState {
    history_cap: usize,
    snapshot: Option<SensorReading>,
    history: BTreeMap<String, HistorySeries>,
    sensor_error: bool,
    position: Position,
    diagnostics: Vec<DiagnosticCode>,
    trips: Option<Vec<TripRecord>>,
    trips_loading: bool,
    trip_error: bool,
}

impl DashboardState {
    pub fn new(history_cap: usize, initial_position: Position) -> Self {
        Self {
            history_cap,
            snapshot: None,
            history: BTreeMap::new(),
            sensor_error: false,
            position: initial_position,
            diagnostics: Vec::new(),
            trips: None,
            trips_loading: false,
            trip_error: false,
        }
    }

    /// Successful sensor poll: one sample appended per present field, the
    /// snapshot replaced in full, and the error flag cleared.
    pub fn apply_sensor_reading(&mut self, reading: SensorReading, time_label: &str) {
        let cap = self.history_cap;
        for (field, value) in reading.present_fields() {
            self.history
                .entry(field.to_string())
                .or_insert_with(|| HistorySeries::new(cap))
                .push(SamplePoint::new(time_label.to_string(), value));
        }
        self.snapshot = Some(reading);
        self.sensor_error = false;
    }

    /// Failed sensor poll: flag it, keep the stale snapshot and history.
    pub fn apply_sensor_failure(&mut self) {
        self.sensor_error = true;
    }

    /// Returns true when the held position actually changed.
    pub fn apply_position(&mut self, position: Position) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        true
    }

    pub fn begin_trip_fetch(&mut self) {
        self.trips_loading = true;
    }

    pub fn apply_trips(&mut self, mut trips: Vec<TripRecord>) {
        trips::sort_most_recent_first(&mut trips);
        self.trips = Some(trips);
        self.trips_loading = false;
        self.trip_error = false;
    }

    pub fn apply_trip_failure(&mut self) {
        self.trip_error = true;
        self.trips_loading = false;
    }

    pub fn install_diagnostics(&mut self, codes: Vec<DiagnosticCode>) {
        self.diagnostics = codes;
    }

    pub fn snapshot(&self) -> Option<&SensorReading> {
        self.snapshot.as_ref()
    }

    pub fn history(&self, field: &str) -> Option<&HistorySeries> {
        self.history.get(field)
    }

    pub fn sensor_error(&self) -> bool {
        self.sensor_error
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn diagnostics(&self) -> &[DiagnosticCode] {
        &self.diagnostics
    }

    pub fn trips(&self) -> Option<&[TripRecord]> {
        self.trips.as_deref()
    }

    pub fn trips_loading(&self) -> bool {
        self.trips_loading
    }

    pub fn trip_error(&self) -> bool {
        self.trip_error
    }
}
