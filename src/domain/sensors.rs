// Sensor reading domain model and the OBD-II field catalog
use std::collections::BTreeMap;

/// One full snapshot of OBD-II values, keyed by field name.
/// A missing key means the upstream did not report that field this poll;
/// absence is distinct from a reported zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    values: BTreeMap<String, f64>,
}

impl SensorReading {
    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Iterate over fields that are actually present, in stable name order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A displayable OBD-II field: wire key, human label, and the expected
/// value range used as the y-axis of the drill-down chart.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub y_min: f64,
    pub y_max: f64,
}

/// The nine fields shown on the readings grid.
pub const FIELD_CATALOG: &[FieldSpec] = &[
    FieldSpec { key: "RPM", label: "RPM", y_min: 0.0, y_max: 8000.0 },
    FieldSpec { key: "SPEED", label: "Speed", y_min: 0.0, y_max: 200.0 },
    FieldSpec { key: "ENGINE_LOAD", label: "Engine Load", y_min: 0.0, y_max: 100.0 },
    FieldSpec { key: "LONG_FUEL_TRIM_1", label: "Long Fuel Trim 1", y_min: -50.0, y_max: 50.0 },
    FieldSpec { key: "O2_B1S1", label: "O2 Sensor B1S1", y_min: 0.0, y_max: 1.0 },
    FieldSpec { key: "THROTTLE_POS", label: "Throttle Position", y_min: 0.0, y_max: 100.0 },
    FieldSpec { key: "COOLANT_TEMP", label: "Coolant Temperature", y_min: 0.0, y_max: 120.0 },
    FieldSpec { key: "MAF", label: "Mass Air Flow (MAF)", y_min: 0.0, y_max: 300.0 },
    FieldSpec { key: "FUEL_LEVEL", label: "Fuel Level", y_min: 0.0, y_max: 100.0 },
];

pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    FIELD_CATALOG.iter().find(|f| f.key == key)
}

const TANK_CAPACITY_L: f64 = 73.0;
const FUEL_ECONOMY_KM_PER_L: f64 = 10.0;

/// Remaining driving range from the FUEL_LEVEL percentage.
pub fn estimated_range_km(fuel_level_percent: f64) -> f64 {
    fuel_level_percent / 100.0 * TANK_CAPACITY_L * FUEL_ECONOMY_KM_PER_L
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pairs: &[(&str, f64)]) -> SensorReading {
        SensorReading::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn test_absent_field_is_none_not_zero() {
        let r = reading(&[("RPM", 0.0)]);
        assert_eq!(r.value("RPM"), Some(0.0));
        assert_eq!(r.value("SPEED"), None);
    }

    #[test]
    fn test_field_spec_lookup() {
        let spec = field_spec("COOLANT_TEMP").unwrap();
        assert_eq!(spec.label, "Coolant Temperature");
        assert_eq!(spec.y_max, 120.0);
        assert!(field_spec("NOT_A_FIELD").is_none());
    }

    #[test]
    fn test_estimated_range() {
        // Full tank: 73 L at 10 km/L
        assert_eq!(estimated_range_km(100.0), 730.0);
        assert_eq!(estimated_range_km(50.0), 365.0);
        assert_eq!(estimated_range_km(0.0), 0.0);
    }
}
