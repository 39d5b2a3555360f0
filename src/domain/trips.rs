// Trip history domain model and aggregations
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

const AGGREGATION_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: String,
    pub owner: String,
    pub timestamp: DateTime<Utc>,
    pub distance_km: f64,
    pub fuel_consumption_l: f64,
    pub co2_emissions_g: f64,
}

/// Re-establish display order: most recent trip first.
pub fn sort_most_recent_first(trips: &mut [TripRecord]) {
    trips.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Trips whose timestamp falls within the trailing 90-day window ending at `now`.
pub fn within_window<'a>(trips: &'a [TripRecord], now: DateTime<Utc>) -> Vec<&'a TripRecord> {
    let cutoff = now - Duration::days(AGGREGATION_WINDOW_DAYS);
    trips.iter().filter(|t| t.timestamp >= cutoff).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyFuel {
    pub date: NaiveDate,
    pub total_fuel_l: f64,
}

/// Fuel consumption summed per calendar day over the trailing 90-day window,
/// in chronological order.
pub fn daily_fuel_totals(trips: &[TripRecord], now: DateTime<Utc>) -> Vec<DailyFuel> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trip in within_window(trips, now) {
        *by_date.entry(trip.timestamp.date_naive()).or_insert(0.0) += trip.fuel_consumption_l;
    }
    by_date
        .into_iter()
        .map(|(date, total_fuel_l)| DailyFuel { date, total_fuel_l })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn trip(id: &str, timestamp: DateTime<Utc>, fuel: f64) -> TripRecord {
        TripRecord {
            id: id.to_string(),
            owner: "tirth".to_string(),
            timestamp,
            distance_km: 12.0,
            fuel_consumption_l: fuel,
            co2_emissions_g: 900.0,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_sort_is_strictly_descending() {
        let mut trips = vec![
            trip("a", at(2024, 1, 5, 8), 4.0),
            trip("b", at(2024, 3, 1, 9), 2.0),
            trip("c", at(2024, 2, 10, 7), 3.0),
        ];
        sort_most_recent_first(&mut trips);
        let ids: Vec<&str> = trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(trips.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn test_window_excludes_older_than_90_days() {
        let now = at(2024, 6, 1, 12);
        let trips = vec![
            trip("recent", now - Duration::days(89), 1.0),
            trip("edge", now - Duration::days(90), 1.0),
            trip("old", now - Duration::days(91), 1.0),
        ];
        let ids: Vec<&str> = within_window(&trips, now).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["recent", "edge"]);
    }

    #[test]
    fn test_daily_totals_sum_same_day_trips() {
        let now = at(2024, 6, 1, 12);
        let trips = vec![
            trip("morning", at(2024, 5, 20, 8), 5.0),
            trip("evening", at(2024, 5, 20, 19), 3.2),
            trip("next_day", at(2024, 5, 21, 9), 2.5),
        ];
        let totals = daily_fuel_totals(&trips, now);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        assert!((totals[0].total_fuel_l - 8.2).abs() < 1e-9);
        assert!((totals[1].total_fuel_l - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_daily_totals_ignore_trips_outside_window() {
        let now = at(2024, 6, 1, 12);
        let trips = vec![
            trip("old", at(2023, 1, 1, 8), 50.0),
            trip("recent", at(2024, 5, 30, 8), 1.5),
        ];
        let totals = daily_fuel_totals(&trips, now);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total_fuel_l, 1.5);
    }
}
