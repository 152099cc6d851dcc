/// Rounds an amount to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds a value to one decimal place, used for rating averages.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
