use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub map: MapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub username: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    #[serde(default = "default_position_interval_ms")]
    pub position_interval_ms: u64,
    #[serde(default = "default_sensor_interval_ms")]
    pub sensor_interval_ms: u64,
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            position_interval_ms: default_position_interval_ms(),
            sensor_interval_ms: default_sensor_interval_ms(),
            history_cap: default_history_cap(),
        }
    }
}

fn default_position_interval_ms() -> u64 {
    500
}

fn default_sensor_interval_ms() -> u64 {
    1000
}

fn default_history_cap() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    /// Map-provider API key, forwarded to the map view when present
    #[serde(default)]
    pub provider_key: Option<String>,
    #[serde(default = "default_route_start")]
    pub start: GeoPoint,
    #[serde(default = "default_route_end")]
    pub end: GeoPoint,
    /// Position held before the first successful GPS poll
    #[serde(default = "default_initial_position")]
    pub initial: GeoPoint,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            provider_key: None,
            start: default_route_start(),
            end: default_route_end(),
            initial: default_initial_position(),
        }
    }
}

fn default_route_start() -> GeoPoint {
    GeoPoint { latitude: 43.65696647404934, longitude: -79.74090879453345 }
}

fn default_route_end() -> GeoPoint {
    GeoPoint { latitude: 43.72375, longitude: -79.697722 }
}

fn default_initial_position() -> GeoPoint {
    GeoPoint { latitude: 43.65647222, longitude: -79.73763889 }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
