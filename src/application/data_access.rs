// Null-on-failure accessor layer over the telemetry source
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::diagnostics::DiagnosticCode;
use crate::domain::position::Position;
use crate::domain::sensors::SensorReading;
use crate::domain::trips::TripRecord;
use std::sync::Arc;

/// Absorbs every fetch failure at this boundary: callers get `None` plus a
/// logged diagnostic, never an error, and are expected to keep prior state.
#[derive(Clone)]
pub struct DataAccess {
    source: Arc<dyn TelemetrySource>,
}

impl DataAccess {
    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        Self { source }
    }

    pub async fn sensor_snapshot(&self) -> Option<SensorReading> {
        match self.source.sensor_snapshot().await {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::warn!("Failed to fetch sensor data: {:#}", e);
                None
            }
        }
    }

    pub async fn position(&self) -> Option<Position> {
        match self.source.position().await {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::warn!("Failed to fetch GPS data: {:#}", e);
                None
            }
        }
    }

    pub async fn trips(&self) -> Option<Vec<TripRecord>> {
        match self.source.trips().await {
            Ok(trips) => Some(trips),
            Err(e) => {
                tracing::warn!("Failed to fetch trip data: {:#}", e);
                None
            }
        }
    }

    pub async fn diagnostic_codes(&self) -> Option<Vec<DiagnosticCode>> {
        match self.source.diagnostic_codes().await {
            Ok(codes) => Some(codes),
            Err(e) => {
                tracing::warn!("Failed to fetch diagnostic codes: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl TelemetrySource for FailingSource {
        async fn sensor_snapshot(&self) -> anyhow::Result<SensorReading> {
            anyhow::bail!("connection refused")
        }

        async fn position(&self) -> anyhow::Result<Position> {
            anyhow::bail!("connection refused")
        }

        async fn trips(&self) -> anyhow::Result<Vec<TripRecord>> {
            anyhow::bail!("connection refused")
        }

        async fn diagnostic_codes(&self) -> anyhow::Result<Vec<DiagnosticCode>> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_failures_become_none() {
        let access = DataAccess::new(Arc::new(FailingSource));
        assert!(access.sensor_snapshot().await.is_none());
        assert!(access.position().await.is_none());
        assert!(access.trips().await.is_none());
        assert!(access.diagnostic_codes().await.is_none());
    }
}
