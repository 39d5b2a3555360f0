// Polling loops feeding the dashboard state store
use crate::application::data_access::DataAccess;
use crate::application::store::DashboardState;
use crate::infrastructure::config::PollingSettings;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Drives the two recurring polls (fast position, slower sensors) plus the
/// one-time trip fetch and diagnostic-code install.
///
/// Each loop awaits its fetch before honoring the next tick, so a slow
/// upstream coalesces polls instead of stacking in-flight requests.
pub struct TelemetryPoller {
    data: DataAccess,
    state: Arc<RwLock<DashboardState>>,
    settings: PollingSettings,
}

/// Lifecycle handle for the polling tasks. Dropping it (or calling `stop`)
/// tears the loops down with the view that owns them.
pub struct PollerHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn stop(&self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl TelemetryPoller {
    pub fn new(
        data: DataAccess,
        state: Arc<RwLock<DashboardState>>,
        settings: PollingSettings,
    ) -> Self {
        Self { data, state, settings }
    }

    pub fn spawn(self) -> PollerHandle {
        let mut tasks = Vec::new();

        // One-shot: diagnostics install + trip fetch
        {
            let data = self.data.clone();
            let state = self.state.clone();
            tasks.push(tokio::spawn(async move {
                Self::install_diagnostics(&data, &state).await;
                Self::fetch_trips_once(&data, &state).await;
            }));
        }

        // Fast position loop
        {
            let data = self.data.clone();
            let state = self.state.clone();
            let period = Duration::from_millis(self.settings.position_interval_ms);
            tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    Self::poll_position_once(&data, &state).await;
                }
            }));
        }

        // Slower sensor loop
        {
            let data = self.data;
            let state = self.state;
            let period = Duration::from_millis(self.settings.sensor_interval_ms);
            tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    Self::poll_sensors_once(&data, &state).await;
                }
            }));
        }

        PollerHandle { tasks }
    }

    pub async fn poll_sensors_once(data: &DataAccess, state: &RwLock<DashboardState>) {
        let label = chrono::Local::now().format("%H:%M:%S").to_string();
        match data.sensor_snapshot().await {
            Some(reading) => state.write().await.apply_sensor_reading(reading, &label),
            None => state.write().await.apply_sensor_failure(),
        }
    }

    pub async fn poll_position_once(data: &DataAccess, state: &RwLock<DashboardState>) {
        if let Some(position) = data.position().await {
            let moved = state.write().await.apply_position(position);
            if moved {
                tracing::debug!(
                    "Position updated to ({}, {})",
                    position.latitude,
                    position.longitude
                );
            }
        }
    }

    pub async fn fetch_trips_once(data: &DataAccess, state: &RwLock<DashboardState>) {
        state.write().await.begin_trip_fetch();
        match data.trips().await {
            Some(trips) => {
                tracing::debug!("Loaded {} trip records", trips.len());
                state.write().await.apply_trips(trips);
            }
            None => state.write().await.apply_trip_failure(),
        }
    }

    pub async fn install_diagnostics(data: &DataAccess, state: &RwLock<DashboardState>) {
        if let Some(codes) = data.diagnostic_codes().await {
            state.write().await.install_diagnostics(codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::telemetry_source::TelemetrySource;
    use crate::domain::diagnostics::{sample_codes, DiagnosticCode};
    use crate::domain::position::Position;
    use crate::domain::sensors::SensorReading;
    use crate::domain::trips::TripRecord;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Scriptable source: flips between healthy and failing.
    struct ScriptedSource {
        failing: AtomicBool,
    }

    impl ScriptedSource {
        fn healthy() -> Self {
            Self { failing: AtomicBool::new(false) }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> anyhow::Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                anyhow::bail!("upstream unavailable");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TelemetrySource for ScriptedSource {
        async fn sensor_snapshot(&self) -> anyhow::Result<SensorReading> {
            self.check()?;
            let mut values = BTreeMap::new();
            values.insert("RPM".to_string(), 1200.0);
            values.insert("FUEL_LEVEL".to_string(), 40.0);
            Ok(SensorReading::new(values))
        }

        async fn position(&self) -> anyhow::Result<Position> {
            self.check()?;
            Ok(Position::new(43.7, -79.7))
        }

        async fn trips(&self) -> anyhow::Result<Vec<TripRecord>> {
            self.check()?;
            Ok(vec![TripRecord {
                id: "t1".to_string(),
                owner: "tirth".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
                distance_km: 18.0,
                fuel_consumption_l: 1.4,
                co2_emissions_g: 420.0,
            }])
        }

        async fn diagnostic_codes(&self) -> anyhow::Result<Vec<DiagnosticCode>> {
            self.check()?;
            Ok(sample_codes())
        }
    }

    fn harness() -> (Arc<ScriptedSource>, DataAccess, Arc<RwLock<DashboardState>>) {
        let source = Arc::new(ScriptedSource::healthy());
        let data = DataAccess::new(source.clone());
        let state = Arc::new(RwLock::new(DashboardState::new(
            10,
            Position::new(0.0, 0.0),
        )));
        (source, data, state)
    }

    #[tokio::test]
    async fn test_sensor_poll_appends_history_and_snapshot() {
        let (_, data, state) = harness();
        TelemetryPoller::poll_sensors_once(&data, &state).await;
        TelemetryPoller::poll_sensors_once(&data, &state).await;

        let state = state.read().await;
        assert_eq!(state.snapshot().unwrap().value("RPM"), Some(1200.0));
        assert_eq!(state.history("RPM").unwrap().len(), 2);
        assert!(!state.sensor_error());
    }

    #[tokio::test]
    async fn test_failed_sensor_poll_preserves_prior_state() {
        let (source, data, state) = harness();
        TelemetryPoller::poll_sensors_once(&data, &state).await;

        source.set_failing(true);
        TelemetryPoller::poll_sensors_once(&data, &state).await;

        let state = state.read().await;
        assert!(state.sensor_error());
        assert_eq!(state.snapshot().unwrap().value("RPM"), Some(1200.0));
        assert_eq!(state.history("RPM").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_position_reads_are_no_ops() {
        let (_, data, state) = harness();
        TelemetryPoller::poll_position_once(&data, &state).await;
        assert_eq!(state.read().await.position(), Position::new(43.7, -79.7));

        // Same fix again: state must not transition
        TelemetryPoller::poll_position_once(&data, &state).await;
        assert_eq!(state.read().await.position(), Position::new(43.7, -79.7));
    }

    #[tokio::test]
    async fn test_failed_position_poll_keeps_held_fix() {
        let (source, data, state) = harness();
        TelemetryPoller::poll_position_once(&data, &state).await;

        source.set_failing(true);
        TelemetryPoller::poll_position_once(&data, &state).await;
        assert_eq!(state.read().await.position(), Position::new(43.7, -79.7));
    }

    #[tokio::test]
    async fn test_trip_fetch_populates_sorted_state() {
        let (_, data, state) = harness();
        TelemetryPoller::fetch_trips_once(&data, &state).await;

        let state = state.read().await;
        assert!(!state.trips_loading());
        assert_eq!(state.trips().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_trip_fetch_failure_sets_error_flag() {
        let (source, data, state) = harness();
        source.set_failing(true);
        TelemetryPoller::fetch_trips_once(&data, &state).await;

        let state = state.read().await;
        assert!(state.trip_error());
        assert!(state.trips().is_none());
    }

    #[tokio::test]
    async fn test_handle_stop_aborts_loops() {
        let (_, data, state) = harness();
        let poller = TelemetryPoller::new(
            data,
            state,
            PollingSettings {
                position_interval_ms: 5,
                sensor_interval_ms: 5,
                history_cap: 10,
            },
        );
        let handle = poller.spawn();
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.tasks.iter().all(|task| task.is_finished()));
    }
}
