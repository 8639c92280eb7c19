//! Civil-time handling and solar-time correction.
//!
//! This crate provides:
//! - Civil (wall-clock) time to UTC instant conversion for fixed offsets
//! - Standard-meridian derivation from a timezone offset
//! - A trigonometric equation-of-time approximation
//! - Local-mean-time / true-solar-time correction with day rollover
//!
//! All sub-day arithmetic is carried in whole seconds.

pub mod civil;
pub mod equation_of_time;
pub mod solar_time;

pub use civil::{
    MAX_TZ_OFFSET_MINUTES, SECONDS_PER_DAY, local_to_utc, standard_meridian_deg, utc_to_local,
};
pub use equation_of_time::{equation_of_time_minutes, equation_of_time_seconds};
pub use solar_time::{CorrectionOffsets, SolarTimeCorrection, SolarTimeMode, correct};
