// Dashboard service - derives the tab view models from the state store
use crate::application::store::DashboardState;
use crate::domain::diagnostics::Severity;
use crate::domain::sensors::{self, FIELD_CATALOG};
use crate::domain::trips::{self, TripRecord};
use crate::infrastructure::config::MapSettings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

const SENSOR_ERROR_MESSAGE: &str = "Failed to load sensor data.";
const TRIPS_ERROR_MESSAGE: &str = "Failed to load trips data.";

#[derive(Debug, Serialize)]
pub struct DiagnosticsView {
    pub codes: Vec<DiagnosticEntry>,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticEntry {
    pub code: String,
    pub description: String,
    pub severity: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadingsView {
    pub error: Option<&'static str>,
    pub fields: Vec<ReadingCell>,
}

#[derive(Debug, Serialize)]
pub struct ReadingCell {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FieldChartView {
    pub key: &'static str,
    pub label: &'static str,
    pub y_min: f64,
    pub y_max: f64,
    pub samples: Vec<ChartSample>,
}

#[derive(Debug, Serialize)]
pub struct ChartSample {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct MapView {
    pub current: Coordinates,
    pub route_start: Coordinates,
    pub route_end: Coordinates,
    pub estimated_range_km: Option<f64>,
    pub provider_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TripsView {
    pub loading: bool,
    pub error: Option<&'static str>,
    pub most_recent: Option<TripEntry>,
    pub previous: Vec<TripEntry>,
    pub daily_fuel: Vec<DailyFuelEntry>,
}

#[derive(Debug, Serialize)]
pub struct TripEntry {
    pub id: String,
    pub date: String,
    pub distance_km: f64,
    pub fuel_consumption_l: f64,
    pub co2_emissions_g: f64,
}

#[derive(Debug, Serialize)]
pub struct DailyFuelEntry {
    pub date: String,
    pub total_fuel_l: f64,
}

/// Read-only projection of `DashboardState` into the four tab views.
/// Triggers no fetches of its own.
#[derive(Clone)]
pub struct DashboardService {
    state: Arc<RwLock<DashboardState>>,
    map: MapSettings,
}

impl DashboardService {
    pub fn new(state: Arc<RwLock<DashboardState>>, map: MapSettings) -> Self {
        Self { state, map }
    }

    pub async fn diagnostics(&self) -> DiagnosticsView {
        let state = self.state.read().await;
        let codes = state
            .diagnostics()
            .iter()
            .map(|dtc| DiagnosticEntry {
                code: dtc.code.clone(),
                description: dtc.description.clone(),
                severity: match dtc.severity {
                    Severity::Normal => "normal",
                    Severity::Danger => "danger",
                },
            })
            .collect();
        DiagnosticsView { codes }
    }

    pub async fn readings(&self) -> ReadingsView {
        let state = self.state.read().await;
        let fields = FIELD_CATALOG
            .iter()
            .map(|spec| ReadingCell {
                key: spec.key,
                label: spec.label,
                value: state.snapshot().and_then(|s| s.value(spec.key)),
            })
            .collect();
        ReadingsView {
            error: state.sensor_error().then_some(SENSOR_ERROR_MESSAGE),
            fields,
        }
    }

    /// Drill-down chart for one catalog field. None for an unknown field.
    pub async fn field_chart(&self, field: &str) -> Option<FieldChartView> {
        let spec = sensors::field_spec(field)?;
        let state = self.state.read().await;
        let samples = state
            .history(field)
            .map(|series| {
                series
                    .samples()
                    .map(|s| ChartSample {
                        time: s.time.clone(),
                        value: s.value,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Some(FieldChartView {
            key: spec.key,
            label: spec.label,
            y_min: spec.y_min,
            y_max: spec.y_max,
            samples,
        })
    }

    pub async fn map(&self) -> MapView {
        let state = self.state.read().await;
        let position = state.position();
        let fuel_level = state.snapshot().and_then(|s| s.value("FUEL_LEVEL"));
        MapView {
            current: Coordinates {
                latitude: position.latitude,
                longitude: position.longitude,
            },
            route_start: Coordinates {
                latitude: self.map.start.latitude,
                longitude: self.map.start.longitude,
            },
            route_end: Coordinates {
                latitude: self.map.end.latitude,
                longitude: self.map.end.longitude,
            },
            estimated_range_km: fuel_level.map(sensors::estimated_range_km),
            provider_key: self.map.provider_key.clone(),
        }
    }

    pub async fn trips(&self) -> TripsView {
        self.trips_at(Utc::now()).await
    }

    async fn trips_at(&self, now: DateTime<Utc>) -> TripsView {
        let state = self.state.read().await;
        let Some(trips) = state.trips() else {
            return TripsView {
                loading: state.trips_loading(),
                error: state.trip_error().then_some(TRIPS_ERROR_MESSAGE),
                most_recent: None,
                previous: Vec::new(),
                daily_fuel: Vec::new(),
            };
        };

        let daily_fuel = trips::daily_fuel_totals(trips, now)
            .into_iter()
            .map(|day| DailyFuelEntry {
                date: day.date.to_string(),
                total_fuel_l: day.total_fuel_l,
            })
            .collect();

        let mut entries = trips.iter().map(trip_entry);
        TripsView {
            loading: state.trips_loading(),
            error: state.trip_error().then_some(TRIPS_ERROR_MESSAGE),
            most_recent: entries.next(),
            previous: entries.collect(),
            daily_fuel,
        }
    }
}

fn trip_entry(trip: &TripRecord) -> TripEntry {
    TripEntry {
        id: trip.id.clone(),
        date: trip.timestamp.to_rfc3339(),
        distance_km: trip.distance_km,
        fuel_consumption_l: trip.fuel_consumption_l,
        co2_emissions_g: trip.co2_emissions_g,
    }
}
