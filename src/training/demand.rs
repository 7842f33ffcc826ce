use super::records::{timestamp_at, DemandRecord};
use super::TrainingError;
use crate::core::time::hour_of_week;
use crate::models::{DemandEntry, DemandModel};
use std::collections::BTreeMap;

/// Aggregate observations into mean trips per (zone, hour-of-week)
///
/// Buckets without observations get no entry; the service substitutes its
/// baseline for them at lookup time.
pub fn train_demand(records: &[DemandRecord]) -> Result<DemandModel, TrainingError> {
    if records.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let mut sums: BTreeMap<(String, u16), (f64, u64)> = BTreeMap::new();

    for (row, record) in records.iter().enumerate() {
        let ts = timestamp_at(row, "ts", &record.ts)?;
        if !record.trips.is_finite() || record.trips < 0.0 {
            return Err(TrainingError::InvalidValue {
                row: row + 1,
                column: "trips",
                value: record.trips,
            });
        }

        let bucket = sums
            .entry((record.zone_id.clone(), hour_of_week(&ts)))
            .or_insert((0.0, 0));
        bucket.0 += record.trips;
        bucket.1 += 1;
    }

    let entries: Vec<DemandEntry> = sums
        .into_iter()
        .map(|((zone_id, hour_of_week), (sum, count))| DemandEntry {
            zone_id,
            hour_of_week,
            mean_trips: sum / count as f64,
            observations: count,
        })
        .collect();

    tracing::info!(
        "Aggregated {} records into {} demand buckets",
        records.len(),
        entries.len()
    );

    DemandModel::from_entries(entries).map_err(TrainingError::InvalidModel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, zone: &str, trips: f64) -> DemandRecord {
        DemandRecord {
            ts: ts.to_string(),
            zone_id: zone.to_string(),
            trips,
        }
    }

    #[test]
    fn test_mean_per_bucket() {
        // 2024-01-01 and 2024-01-08 are both Mondays
        let records = vec![
            record("2024-01-01 08:10:00", "z1", 4.0),
            record("2024-01-08 08:50:00", "z1", 6.0),
            record("2024-01-01 09:00:00", "z1", 3.0),
            record("2024-01-01 08:00:00", "z2", 1.0),
        ];

        let model = train_demand(&records).unwrap();

        assert_eq!(model.len(), 3);
        assert_eq!(model.get("z1", 8), Some(5.0));
        assert_eq!(model.get("z1", 9), Some(3.0));
        assert_eq!(model.get("z2", 8), Some(1.0));
        assert_eq!(model.get("z2", 9), None);
    }

    #[test]
    fn test_observation_counts() {
        let records = vec![
            record("2024-01-02 00:00:00", "z1", 2.0),
            record("2024-01-02 00:30:00", "z1", 2.0),
        ];
        let model = train_demand(&records).unwrap();
        let entries = model.entries();
        assert_eq!(entries[0].hour_of_week, 24);
        assert_eq!(entries[0].observations, 2);
    }

    #[test]
    fn test_malformed_timestamp_is_fatal() {
        let records = vec![
            record("2024-01-01 08:00:00", "z1", 1.0),
            record("31/01/2024", "z1", 1.0),
        ];
        assert!(matches!(
            train_demand(&records),
            Err(TrainingError::Timestamp { row: 2, .. })
        ));
    }

    #[test]
    fn test_negative_trips_is_fatal() {
        let records = vec![record("2024-01-01 08:00:00", "z1", -1.0)];
        assert!(matches!(
            train_demand(&records),
            Err(TrainingError::InvalidValue { column: "trips", .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(train_demand(&[]), Err(TrainingError::EmptyDataset)));
    }
}
