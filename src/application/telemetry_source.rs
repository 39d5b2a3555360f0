// Source trait for vehicle telemetry data access
use crate::domain::diagnostics::DiagnosticCode;
use crate::domain::position::Position;
use crate::domain::sensors::SensorReading;
use crate::domain::trips::TripRecord;
use async_trait::async_trait;

/// Everything the dashboard reads comes through this interface, including
/// diagnostic codes, so a live DTC feed can replace the built-in list
/// without touching the consuming views.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Full OBD-II snapshot for the configured vehicle
    async fn sensor_snapshot(&self) -> anyhow::Result<SensorReading>;

    /// Current GPS fix
    async fn position(&self) -> anyhow::Result<Position>;

    /// Complete trip history, unordered
    async fn trips(&self) -> anyhow::Result<Vec<TripRecord>>;

    /// Active diagnostic trouble codes
    async fn diagnostic_codes(&self) -> anyhow::Result<Vec<DiagnosticCode>>;
}
