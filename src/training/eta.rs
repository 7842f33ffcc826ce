use super::records::{timestamp_at, TripRecord};
use super::TrainingError;
use crate::core::fit_ols;
use crate::core::time::day_of_week;
use crate::models::EtaCalibrationModel;
use chrono::Timelike;

/// Feature row `[osrm_duration, hour, dow]` for one trip
///
/// Blank or non-finite routing durations are imputed as 0.
pub fn trip_features(row: usize, record: &TripRecord) -> Result<[f64; 3], TrainingError> {
    let pickup = timestamp_at(row, "pickup_ts", &record.pickup_ts)?;
    let osrm_duration = record
        .osrm_duration
        .filter(|d| d.is_finite())
        .unwrap_or(0.0);

    Ok([
        osrm_duration,
        pickup.hour() as f64,
        day_of_week(&pickup) as f64,
    ])
}

/// Fit the ETA calibration model by ordinary least squares
pub fn train_eta(records: &[TripRecord]) -> Result<EtaCalibrationModel, TrainingError> {
    if records.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let mut features = Vec::with_capacity(records.len());
    let mut targets = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        features.push(trip_features(row, record)?);

        let actual = record.actual_duration.unwrap_or(f64::NAN);
        if !actual.is_finite() {
            return Err(TrainingError::InvalidValue {
                row: row + 1,
                column: "actual_duration",
                value: actual,
            });
        }
        targets.push(actual);
    }

    let fit = fit_ols(&features, &targets)?;

    tracing::info!(
        "Fitted ETA calibration on {} trips: coefficients={:?}, intercept={:.3}, r2={:.4}",
        fit.n_samples,
        fit.coefficients,
        fit.intercept,
        fit.r_squared
    );

    Ok(EtaCalibrationModel {
        coefficients: fit.coefficients.to_vec(),
        intercept: fit.intercept,
        n_samples: fit.n_samples,
        r_squared: fit.r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Regressor;

    fn trip(ts: &str, osrm: Option<f64>, actual: Option<f64>) -> TripRecord {
        TripRecord {
            pickup_ts: ts.to_string(),
            osrm_duration: osrm,
            actual_duration: actual,
        }
    }

    #[test]
    fn test_features_impute_missing_duration() {
        let record = trip("2024-01-03 18:45:00", None, Some(100.0));
        assert_eq!(trip_features(0, &record).unwrap(), [0.0, 18.0, 2.0]);

        let record = trip("2024-01-03 18:45:00", Some(f64::NAN), Some(100.0));
        assert_eq!(trip_features(0, &record).unwrap()[0], 0.0);
    }

    #[test]
    fn test_recovers_linear_calibration() {
        // actual = 30 + 1.2 * osrm + 5 * hour - 2 * dow
        let mut records = Vec::new();
        for day in 1..=7 {
            for hour in [6, 8, 12, 17, 22] {
                let osrm = 200.0 + ((day * 37 + hour * 11) % 53) as f64 * 9.0;
                let ts = format!("2024-01-{:02} {:02}:15:00", day, hour);
                let dow = (day - 1) as f64;
                let actual = 30.0 + 1.2 * osrm + 5.0 * hour as f64 - 2.0 * dow;
                records.push(trip(&ts, Some(osrm), Some(actual)));
            }
        }

        let model = train_eta(&records).unwrap();

        assert!((model.coefficients[0] - 1.2).abs() < 1e-6);
        assert!((model.coefficients[1] - 5.0).abs() < 1e-6);
        assert!((model.coefficients[2] + 2.0).abs() < 1e-6);
        assert!((model.intercept - 30.0).abs() < 1e-4);
        assert_eq!(model.n_samples, 35);

        let predicted = model.predict(&[500.0, 8.0, 3.0]).unwrap();
        assert!((predicted - (30.0 + 600.0 + 40.0 - 6.0)).abs() < 1e-4);
    }

    #[test]
    fn test_single_weekday_still_fits() {
        // Every trip on a Wednesday leaves dow without variance
        let records: Vec<TripRecord> = (0..6)
            .map(|i| {
                let osrm = 300.0 + 60.0 * ((i * 5) % 6) as f64;
                trip(&format!("2024-01-03 {:02}:00:00", 7 + i), Some(osrm), Some(osrm * 1.1))
            })
            .collect();

        let model = train_eta(&records).unwrap();
        assert_eq!(model.coefficients.len(), 3);
        assert!(model.coefficients[2].abs() < 1e-9);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_missing_actual_duration_is_fatal() {
        let records = vec![
            trip("2024-01-03 08:00:00", Some(300.0), Some(320.0)),
            trip("2024-01-03 09:00:00", Some(300.0), None),
        ];
        assert!(matches!(
            train_eta(&records),
            Err(TrainingError::InvalidValue { row: 2, column: "actual_duration", .. })
        ));
    }

    #[test]
    fn test_malformed_pickup_ts_is_fatal() {
        let records = vec![trip("soon", Some(300.0), Some(320.0))];
        assert!(matches!(train_eta(&records), Err(TrainingError::Timestamp { column: "pickup_ts", .. })));
    }
}
