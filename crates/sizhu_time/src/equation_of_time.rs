//! Equation of time from day-of-year.
//!
//! Low-order trigonometric fit (amplitude terms 9.87, 7.53, 1.5 minutes):
//!
//! ```text
//! B = 2π (N - 81) / 365
//! E = 9.87 sin 2B - 7.53 cos B - 1.5 sin B      [minutes]
//! ```
//!
//! Positive E means the apparent Sun is ahead of the mean Sun. Accuracy is
//! within about a minute, which is the granularity the day/hour pillars need.

use std::f64::consts::TAU;

/// Equation of time in minutes for a 1-based day of year.
pub fn equation_of_time_minutes(day_of_year: u32) -> f64 {
    let b = TAU * (f64::from(day_of_year) - 81.0) / 365.0;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Equation of time rounded to whole seconds.
pub fn equation_of_time_seconds(day_of_year: u32) -> i64 {
    (equation_of_time_minutes(day_of_year) * 60.0).round() as i64
}
