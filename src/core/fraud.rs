/// Account signals used by the fraud rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FraudSignals {
    pub user_trips: i64,
    pub chargebacks: i64,
    pub device_changes_last_7d: i64,
    pub payment_failures_last_7d: i64,
}

/// Rule-based fraud risk in [0, 1]
///
/// risk = min(1,
///     0.5 * (chargebacks > 0) +
///     0.3 * (payment failures > 2) +
///     0.2 * (device changes > 3) +
///     0.1 * (trips < 3)
/// )
pub fn fraud_risk(signals: &FraudSignals) -> f64 {
    let mut risk = 0.0;

    if signals.chargebacks > 0 {
        risk += 0.5;
    }
    if signals.payment_failures_last_7d > 2 {
        risk += 0.3;
    }
    if signals.device_changes_last_7d > 3 {
        risk += 0.2;
    }
    // New accounts carry a small baseline risk
    if signals.user_trips < 3 {
        risk += 0.1;
    }

    f64::min(1.0, risk)
}
