//! Discomfort index derivation.
//!
//! The discomfort index combines air temperature (°C) and relative
//! humidity (%) into a single comfort score:
//!
//! ```text
//! DI = 0.81·T + 0.01·H·(0.99·T − 14.3) + 46.3
//! ```
//!
//! The result is rounded to two decimal places. The rounded value is what
//! gets stored, and stored values are never recomputed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Compute the discomfort index for a temperature and humidity.
///
/// # Examples
///
/// ```
/// use sensorlog::discomfort_index;
///
/// assert_eq!(discomfort_index(25.0, 60.0), 72.82);
/// ```
#[must_use]
pub fn discomfort_index(temperature: f64, humidity: f64) -> f64 {
    let raw = 0.81 * temperature + 0.01 * humidity * (0.99 * temperature - 14.3) + 46.3;
    round2(raw)
}

/// Round to two decimals from the exact value of `value`, ties to even.
fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
