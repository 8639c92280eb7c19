//! Local-mean-time and true-solar-time correction.
//!
//! ```text
//! meridian    = tz_offset_minutes / 60 * 15                [deg]
//! lmt_offset  = (longitude - meridian) * 240               [s]
//! eot_offset  = equation_of_time(day_of_year) * 60         [s]   (TST only)
//! elapsed     = seconds_since_midnight + lmt_offset + eot_offset
//! day_delta   = floor(elapsed / 86400)
//! clock       = elapsed mod 86400
//! ```
//!
//! Offsets are rounded to whole seconds once and then combined with integer
//! arithmetic, so a birth a few seconds from a boundary never drifts by a
//! rounded minute.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::civil::{SECONDS_PER_DAY, standard_meridian_deg};
use crate::equation_of_time::equation_of_time_seconds;

/// Four minutes of clock time per degree of longitude.
const SECONDS_PER_DEGREE: f64 = 240.0;

/// Which solar-time correction to apply to the civil clock.
///
/// The longitude lives inside the variants that need it, so a correction
/// mode without a longitude cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SolarTimeMode {
    /// Use the civil clock as-is.
    #[default]
    #[serde(rename = "NONE")]
    None,
    /// Local mean time: longitude offset from the standard meridian.
    #[serde(rename = "LMT")]
    LocalMean {
        /// Geographic longitude in degrees, east positive.
        longitude_deg: f64,
    },
    /// True solar time: local mean time plus the equation of time.
    #[serde(rename = "TST")]
    TrueSolar {
        /// Geographic longitude in degrees, east positive.
        longitude_deg: f64,
    },
}

impl SolarTimeMode {
    /// Short code (`NONE`, `LMT`, `TST`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::LocalMean { .. } => "LMT",
            Self::TrueSolar { .. } => "TST",
        }
    }

    /// Longitude carried by the mode, if any.
    pub const fn longitude_deg(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::LocalMean { longitude_deg } | Self::TrueSolar { longitude_deg } => {
                Some(longitude_deg)
            }
        }
    }
}

/// Individual offsets that make up a correction, for debugging and reports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CorrectionOffsets {
    /// Standard meridian implied by the timezone offset, degrees east.
    pub standard_meridian_deg: f64,
    /// Longitude offset from the standard meridian, seconds.
    pub lmt_seconds: i64,
    /// Equation-of-time offset, seconds (zero unless TST).
    pub eot_seconds: i64,
    /// Sum of the above, seconds.
    pub total_seconds: i64,
}

/// Result of applying a solar-time correction to a civil clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarTimeCorrection {
    /// Mode that produced this correction.
    pub mode: SolarTimeMode,
    /// The civil reading that was corrected.
    pub civil: NaiveDateTime,
    /// Corrected clock time of day.
    pub clock: NaiveTime,
    /// Calendar days the correction crossed: -1, 0 or +1 while the longitude
    /// is within 180 degrees of the zone's standard meridian, up to ±2 beyond.
    pub day_delta: i32,
    /// Corrected date and time, with `day_delta` already applied to the date.
    pub adjusted: NaiveDateTime,
    /// Offsets that were applied.
    pub offsets: CorrectionOffsets,
}

impl SolarTimeCorrection {
    /// A correction that leaves the civil reading untouched.
    pub fn identity(civil: NaiveDateTime) -> Self {
        Self {
            mode: SolarTimeMode::None,
            civil,
            clock: civil.time(),
            day_delta: 0,
            adjusted: civil,
            offsets: CorrectionOffsets::default(),
        }
    }
}

/// Correct a civil clock reading to local mean or true solar time.
///
/// `SolarTimeMode::None` is a no-op.
pub fn correct(
    local: NaiveDateTime,
    tz_offset_minutes: i32,
    mode: SolarTimeMode,
) -> SolarTimeCorrection {
    let (longitude_deg, with_eot) = match mode {
        SolarTimeMode::None => return SolarTimeCorrection::identity(local),
        SolarTimeMode::LocalMean { longitude_deg } => (longitude_deg, false),
        SolarTimeMode::TrueSolar { longitude_deg } => (longitude_deg, true),
    };

    let meridian = standard_meridian_deg(tz_offset_minutes);
    let lmt_seconds = ((longitude_deg - meridian) * SECONDS_PER_DEGREE).round() as i64;
    let eot_seconds = if with_eot {
        equation_of_time_seconds(local.ordinal())
    } else {
        0
    };
    let total_seconds = lmt_seconds + eot_seconds;

    let elapsed = i64::from(local.num_seconds_from_midnight()) + total_seconds;
    let day_delta = elapsed.div_euclid(SECONDS_PER_DAY);
    let seconds_of_day = elapsed.rem_euclid(SECONDS_PER_DAY) as u32;
    let clock = NaiveTime::from_num_seconds_from_midnight_opt(seconds_of_day, 0).unwrap_or_default();
    let date = local.date() + Duration::days(day_delta);

    SolarTimeCorrection {
        mode,
        civil: local,
        clock,
        day_delta: day_delta as i32,
        adjusted: date.and_time(clock),
        offsets: CorrectionOffsets {
            standard_meridian_deg: meridian,
            lmt_seconds,
            eot_seconds,
            total_seconds,
        },
    }
}
