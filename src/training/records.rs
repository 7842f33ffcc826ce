use super::TrainingError;
use crate::core::time::parse_timestamp;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;

/// One row of demand observations (`ts, zone_id, trips`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DemandRecord {
    pub ts: String,
    pub zone_id: String,
    pub trips: f64,
}

/// One historical trip (`pickup_ts, osrm_duration, actual_duration`)
///
/// `osrm_duration` may be blank; trainers impute it as 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TripRecord {
    pub pickup_ts: String,
    #[serde(default)]
    pub osrm_duration: Option<f64>,
    #[serde(default)]
    pub actual_duration: Option<f64>,
}

pub const DEMAND_COLUMNS: &[&str] = &["ts", "zone_id", "trips"];
pub const TRIP_COLUMNS: &[&str] = &["pickup_ts", "osrm_duration", "actual_duration"];

/// Read demand observations from CSV with a header row
///
/// Extra columns are ignored.
pub fn read_demand_records<R: Read>(reader: R) -> Result<Vec<DemandRecord>, TrainingError> {
    read_records(reader, DEMAND_COLUMNS)
}

/// Read historical trips from CSV with a header row
pub fn read_trip_records<R: Read>(reader: R) -> Result<Vec<TripRecord>, TrainingError> {
    read_records(reader, TRIP_COLUMNS)
}

fn read_records<R, T>(reader: R, required: &[&'static str]) -> Result<Vec<T>, TrainingError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Optional fields would silently default, so check the header explicitly
    let headers = csv_reader.headers()?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(TrainingError::MissingColumn(*column));
        }
    }

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Parse a timestamp cell, reporting the (1-based, header excluded) row on failure
pub(crate) fn timestamp_at(row: usize, column: &'static str, raw: &str) -> Result<NaiveDateTime, TrainingError> {
    parse_timestamp(raw).ok_or_else(|| TrainingError::Timestamp {
        row: row + 1,
        column,
        value: raw.to_string(),
    })
}
