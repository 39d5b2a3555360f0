// Upstream telemetry API implementation of the source trait
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::diagnostics::{sample_codes, DiagnosticCode};
use crate::domain::position::Position;
use crate::domain::sensors::SensorReading;
use crate::domain::trips::TripRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::Deserialize;
use std::collections::BTreeMap;

/// HTTP client for the remote telemetry service. All reads target one
/// configured vehicle identity at `{base}/{kind}/get/{username}`.
#[derive(Debug, Clone)]
pub struct UpstreamTelemetryApi {
    client: reqwest::Client,
    base_url: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct GpsWire {
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct TripWire {
    #[serde(rename = "_id")]
    id: String,
    username: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "DistanceTravelled")]
    distance_travelled: f64,
    #[serde(rename = "FuelConsumption")]
    fuel_consumption: f64,
    #[serde(rename = "CO2Emissions")]
    co2_emissions: f64,
}

impl UpstreamTelemetryApi {
    pub fn new(base_url: String, username: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
        }
    }

    fn endpoint(&self, kind: &str) -> String {
        format!(
            "{}/{}/get/{}",
            self.base_url,
            kind,
            urlencoding::encode(&self.username)
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, kind: &str) -> Result<T> {
        let url = self.endpoint(kind);
        let response = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-store")
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Upstream request to {} failed with status {}", url, status);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

fn reading_from_wire(body: serde_json::Value) -> Result<SensorReading> {
    let object = body
        .as_object()
        .context("Sensor payload is not a JSON object")?;

    // Non-numeric entries (ids, nulls) are not sensor fields
    let values: BTreeMap<String, f64> = object
        .iter()
        .filter_map(|(key, value)| value.as_f64().map(|v| (key.clone(), v)))
        .collect();
    Ok(SensorReading::new(values))
}

fn trip_from_wire(wire: TripWire) -> Result<TripRecord> {
    let timestamp = DateTime::parse_from_rfc3339(&wire.date)
        .with_context(|| format!("Invalid trip date '{}'", wire.date))?
        .with_timezone(&Utc);
    Ok(TripRecord {
        id: wire.id,
        owner: wire.username,
        timestamp,
        distance_km: wire.distance_travelled,
        fuel_consumption_l: wire.fuel_consumption,
        co2_emissions_g: wire.co2_emissions,
    })
}

#[async_trait]
impl TelemetrySource for UpstreamTelemetryApi {
    async fn sensor_snapshot(&self) -> Result<SensorReading> {
        let body = self.get_json::<serde_json::Value>("sensor").await?;
        reading_from_wire(body)
    }

    async fn position(&self) -> Result<Position> {
        let wire = self.get_json::<GpsWire>("gps").await?;
        Ok(Position::new(wire.latitude, wire.longitude))
    }

    async fn trips(&self) -> Result<Vec<TripRecord>> {
        let wires = self.get_json::<Vec<TripWire>>("trip").await?;
        wires.into_iter().map(trip_from_wire).collect()
    }

    // No live DTC feed on the upstream yet; serve the built-in list through
    // the same interface a real feed would use.
    async fn diagnostic_codes(&self) -> Result<Vec<DiagnosticCode>> {
        Ok(sample_codes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_shape_and_username_encoding() {
        let api = UpstreamTelemetryApi::new(
            "http://34.42.34.201:8080/".to_string(),
            "tirth patel".to_string(),
        );
        assert_eq!(
            api.endpoint("sensor"),
            "http://34.42.34.201:8080/sensor/get/tirth%20patel"
        );
    }

    #[test]
    fn test_reading_keeps_numeric_fields_only() {
        let body = json!({
            "RPM": 1450.5,
            "SPEED": 0,
            "username": "tirth",
            "MAF": null
        });
        let reading = reading_from_wire(body).unwrap();
        assert_eq!(reading.value("RPM"), Some(1450.5));
        assert_eq!(reading.value("SPEED"), Some(0.0));
        assert_eq!(reading.value("MAF"), None);
        assert_eq!(reading.value("username"), None);
    }

    #[test]
    fn test_reading_rejects_non_object_payload() {
        assert!(reading_from_wire(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_trip_wire_mapping() {
        let wire: TripWire = serde_json::from_value(json!({
            "_id": "6650f0a1",
            "username": "tirth",
            "Date": "2024-05-20T08:30:00Z",
            "__v": 0,
            "DistanceTravelled": 18.4,
            "FuelConsumption": 1.6,
            "CO2Emissions": 3700.0
        }))
        .unwrap();
        let trip = trip_from_wire(wire).unwrap();

        assert_eq!(trip.id, "6650f0a1");
        assert_eq!(trip.owner, "tirth");
        assert_eq!(trip.timestamp.to_rfc3339(), "2024-05-20T08:30:00+00:00");
        assert_eq!(trip.distance_km, 18.4);
    }

    #[test]
    fn test_trip_with_bad_date_is_an_error() {
        let wire: TripWire = serde_json::from_value(json!({
            "_id": "x",
            "username": "tirth",
            "Date": "yesterday",
            "DistanceTravelled": 1.0,
            "FuelConsumption": 1.0,
            "CO2Emissions": 1.0
        }))
        .unwrap();
        assert!(trip_from_wire(wire).is_err());
    }
}
