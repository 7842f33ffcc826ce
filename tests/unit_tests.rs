// Unit tests for the inference scoring functions

use chrono::{TimeZone, Utc};
use ride_ml_inference::core::{
    calibrate_eta, fallback_calibration, fallback_match_score, forecast_demand, fraud_risk, score_match,
    FraudSignals, MatchInputs, PredictionSource, BASELINE_DEMAND,
};
use ride_ml_inference::models::{DemandEntry, DemandModel, EtaCalibrationModel, LogisticMatchModel};
use ride_ml_inference::core::{ProbabilisticClassifier, Regressor};

#[test]
fn test_eta_fallback_rush_hours() {
    for hour in [8, 9, 18, 19] {
        let calibrated = fallback_calibration(1000.0, Some(hour));
        assert!((calibrated - 1150.0).abs() < 1e-9, "hour {}", hour);
    }
}

#[test]
fn test_eta_fallback_off_peak() {
    for hour in [0, 7, 10, 12, 17, 20, 23] {
        assert_eq!(fallback_calibration(1000.0, Some(hour)), 1000.0, "hour {}", hour);
    }
    assert_eq!(fallback_calibration(1000.0, None), 1000.0);
}

#[test]
fn test_eta_model_path() {
    let model = EtaCalibrationModel {
        coefficients: vec![1.1, 2.0, -1.0],
        intercept: 20.0,
        n_samples: 10,
        r_squared: 0.9,
    };

    let prediction = calibrate_eta(Some(&model as &dyn Regressor), 100.0, Some(8), Some(1));

    assert_eq!(prediction.source, PredictionSource::Model);
    assert!((prediction.value - (20.0 + 110.0 + 16.0 - 1.0)).abs() < 1e-9);
}

#[test]
fn test_eta_model_with_wrong_width_falls_back() {
    let model = EtaCalibrationModel {
        coefficients: vec![1.0, 1.0],
        intercept: 0.0,
        n_samples: 10,
        r_squared: 0.0,
    };

    let prediction = calibrate_eta(Some(&model as &dyn Regressor), 100.0, Some(18), None);

    assert_eq!(prediction.source, PredictionSource::Fallback);
    assert!((prediction.value - 115.0).abs() < 1e-9);
}

#[test]
fn test_match_fallback_reference_value() {
    let inputs = MatchInputs {
        eta_sec: 300.0,
        distance_m: Some(2000.0),
        cancellation_rate: Some(0.1),
        ..Default::default()
    };

    let score = fallback_match_score(&inputs);

    // 1 / (1 + 0.5 + 0.4 + 0.5)
    assert!((score - 0.4167).abs() < 1e-4);
}

#[test]
fn test_match_fallback_in_unit_interval() {
    let etas = [-100.0, 0.0, 1.0, 60.0, 600.0, 36_000.0];
    let distances = [None, Some(-5.0), Some(0.0), Some(500.0), Some(1e7)];
    let rates = [None, Some(0.0), Some(0.3), Some(1.0)];

    for eta in etas {
        for distance in distances {
            for rate in rates {
                let score = fallback_match_score(&MatchInputs {
                    eta_sec: eta,
                    distance_m: distance,
                    cancellation_rate: rate,
                    ..Default::default()
                });
                assert!((0.0..=1.0).contains(&score), "eta={} distance={:?} rate={:?}", eta, distance, rate);
            }
        }
    }
}

#[test]
fn test_match_fallback_decreases_with_eta_and_distance() {
    let base = MatchInputs {
        eta_sec: 120.0,
        distance_m: Some(800.0),
        cancellation_rate: Some(0.02),
        ..Default::default()
    };

    let mut previous = fallback_match_score(&base);
    for eta in [240.0, 480.0, 960.0, 1920.0] {
        let score = fallback_match_score(&MatchInputs { eta_sec: eta, ..base });
        assert!(score < previous);
        previous = score;
    }

    let mut previous = fallback_match_score(&base);
    for distance in [1600.0, 3200.0, 6400.0] {
        let score = fallback_match_score(&MatchInputs {
            distance_m: Some(distance),
            ..base
        });
        assert!(score < previous);
        previous = score;
    }
}

#[test]
fn test_match_fallback_decreases_with_cancellations() {
    let base = MatchInputs {
        eta_sec: 300.0,
        distance_m: Some(1000.0),
        ..Default::default()
    };

    let mut previous = fallback_match_score(&MatchInputs {
        cancellation_rate: Some(0.0),
        ..base
    });
    for rate in [0.05, 0.1, 0.5, 1.0] {
        let score = fallback_match_score(&MatchInputs {
            cancellation_rate: Some(rate),
            ..base
        });
        assert!(score < previous);
        previous = score;
    }
}

#[test]
fn test_match_defaults_differ_between_paths() {
    let inputs = MatchInputs {
        eta_sec: 300.0,
        ..Default::default()
    };

    // Heuristic assumes 1 km when distance is missing
    let expected = 1.0 / (1.0 + 0.5 + 0.2 + 0.25);
    assert!((fallback_match_score(&inputs) - expected).abs() < 1e-12);

    // Classifier receives 0 m
    assert_eq!(inputs.features(), [300.0, 0.0, 4.5, 4.5, 0.05]);
}

#[test]
fn test_match_logistic_model_path() {
    let model = LogisticMatchModel {
        weights: vec![0.0, 0.0, 0.0, 0.0, 0.0],
        intercept: 2.0,
    };

    let prediction = score_match(
        Some(&model as &dyn ProbabilisticClassifier),
        &MatchInputs {
            eta_sec: 300.0,
            ..Default::default()
        },
    );

    assert_eq!(prediction.source, PredictionSource::Model);
    assert!((prediction.value - 1.0 / (1.0 + (-2.0f64).exp())).abs() < 1e-12);
}

#[test]
fn test_fraud_all_rules_capped() {
    let signals = FraudSignals {
        user_trips: 1,
        chargebacks: 1,
        device_changes_last_7d: 5,
        payment_failures_last_7d: 5,
    };
    assert_eq!(fraud_risk(&signals), 1.0);
}

#[test]
fn test_fraud_rule_thresholds() {
    let clean = FraudSignals {
        user_trips: 3,
        chargebacks: 0,
        device_changes_last_7d: 3,
        payment_failures_last_7d: 2,
    };
    assert_eq!(fraud_risk(&clean), 0.0);

    assert!((fraud_risk(&FraudSignals { chargebacks: 1, ..clean }) - 0.5).abs() < 1e-12);
    assert!((fraud_risk(&FraudSignals { payment_failures_last_7d: 3, ..clean }) - 0.3).abs() < 1e-12);
    assert!((fraud_risk(&FraudSignals { device_changes_last_7d: 4, ..clean }) - 0.2).abs() < 1e-12);
    assert!((fraud_risk(&FraudSignals { user_trips: 2, ..clean }) - 0.1).abs() < 1e-12);
}

#[test]
fn test_fraud_monotone_in_each_signal() {
    let base = FraudSignals {
        user_trips: 10,
        chargebacks: 0,
        device_changes_last_7d: 0,
        payment_failures_last_7d: 0,
    };

    for n in 0..10 {
        let more_chargebacks = FraudSignals { chargebacks: n + 1, ..base };
        let fewer = FraudSignals { chargebacks: n, ..base };
        assert!(fraud_risk(&more_chargebacks) >= fraud_risk(&fewer));

        let more_failures = FraudSignals { payment_failures_last_7d: n + 1, ..base };
        let fewer = FraudSignals { payment_failures_last_7d: n, ..base };
        assert!(fraud_risk(&more_failures) >= fraud_risk(&fewer));

        let more_devices = FraudSignals { device_changes_last_7d: n + 1, ..base };
        let fewer = FraudSignals { device_changes_last_7d: n, ..base };
        assert!(fraud_risk(&more_devices) >= fraud_risk(&fewer));

        let more_trips = FraudSignals { user_trips: n + 1, ..base };
        let fewer = FraudSignals { user_trips: n, ..base };
        assert!(fraud_risk(&more_trips) <= fraud_risk(&fewer));
    }
}

#[test]
fn test_demand_lookup_and_baseline() {
    let model = DemandModel::from_entries(vec![DemandEntry {
        zone_id: "airport".to_string(),
        hour_of_week: 32,
        mean_trips: 42.0,
        observations: 4,
    }])
    .unwrap();

    // Tuesday 08:00 UTC is hour-of-week 24 + 8
    let tuesday = Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 0).unwrap();
    let prediction = forecast_demand(Some(&model), "airport", 2, tuesday);
    assert_eq!(prediction.source, PredictionSource::Model);
    assert_eq!(prediction.value, vec![42.0, 42.0]);

    let wednesday = Utc.with_ymd_and_hms(2024, 1, 3, 8, 30, 0).unwrap();
    let prediction = forecast_demand(Some(&model), "airport", 1, wednesday);
    assert_eq!(prediction.value, vec![BASELINE_DEMAND]);
}

#[test]
fn test_demand_without_model() {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 0).unwrap();

    let prediction = forecast_demand(None, "z1", 3, now);
    assert_eq!(prediction.source, PredictionSource::Fallback);
    assert_eq!(prediction.value, vec![10.0, 10.0, 10.0]);

    assert!(forecast_demand(None, "z1", 0, now).value.is_empty());
}
