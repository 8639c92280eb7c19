//! Raw birth-input validation.
//!
//! Every check runs; violations are collected and returned together so a
//! caller can report them all at once.

use chrono::NaiveDate;
use serde::Serialize;
use sizhu_config::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, ValidationConfig};
use sizhu_time::{MAX_TZ_OFFSET_MINUTES, SolarTimeMode, standard_meridian_deg};

use crate::input::{BirthInput, DayBoundaryMode, RawBirthInput, ZiHourMode, solar_mode_from_code};

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty list of field violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any violation names `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} invalid field(s)", self.0.len())?;
        for (i, e) in self.0.iter().enumerate() {
            write!(f, "{}{e}", if i == 0 { ": " } else { "; " })?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Range and consistency checks for birth input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl From<&ValidationConfig> for Validator {
    fn from(cfg: &ValidationConfig) -> Self {
        Self {
            min_year: cfg.min_year,
            max_year: cfg.max_year,
        }
    }
}

fn check_range(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: i64,
    lo: i64,
    hi: i64,
) -> bool {
    if (lo..=hi).contains(&value) {
        true
    } else {
        errors.push(FieldError::new(
            field,
            format!("{value} is outside {lo}..={hi}"),
        ));
        false
    }
}

fn check_degrees(errors: &mut Vec<FieldError>, field: &str, value: Option<f64>, limit: f64) -> bool {
    match value {
        Some(v) if !v.is_finite() || v.abs() > limit => {
            errors.push(FieldError::new(
                field,
                format!("{v} is outside -{limit}..={limit} degrees"),
            ));
            false
        }
        _ => true,
    }
}

/// Longest distance between the birth longitude and the zone's standard
/// meridian. Within it a solar correction stays under twelve hours plus the
/// equation of time, so it crosses at most one midnight.
const MAX_MERIDIAN_GAP_DEG: f64 = 180.0;

fn check_meridian_gap(errors: &mut Vec<FieldError>, mode: SolarTimeMode, tz_offset_minutes: i32) {
    let Some(longitude) = mode.longitude_deg() else {
        return;
    };
    let meridian = standard_meridian_deg(tz_offset_minutes);
    let gap = (longitude - meridian).abs();
    if gap > MAX_MERIDIAN_GAP_DEG {
        errors.push(FieldError::new(
            "longitude",
            format!(
                "{longitude} is {gap:.1} degrees from the {meridian:.1} standard meridian of the offset; at most {MAX_MERIDIAN_GAP_DEG} allowed"
            ),
        ));
    }
}

impl Validator {
    /// Validate a raw record into a [`BirthInput`].
    pub fn validate(&self, raw: &RawBirthInput) -> Result<BirthInput, ValidationErrors> {
        let mut errors = Vec::new();

        let year_ok = check_range(
            &mut errors,
            "year",
            raw.year,
            i64::from(self.min_year),
            i64::from(self.max_year),
        );
        let month_ok = check_range(&mut errors, "month", raw.month, 1, 12);
        let day_ok = check_range(&mut errors, "day", raw.day, 1, 31);
        check_range(&mut errors, "hour", raw.hour, 0, 23);
        check_range(&mut errors, "minute", raw.minute, 0, 59);
        if let Some(s) = raw.second {
            check_range(&mut errors, "second", s, 0, 59);
        }
        let tz = i64::from(MAX_TZ_OFFSET_MINUTES);
        let tz_ok = check_range(&mut errors, "tz_offset_minutes", raw.tz_offset_minutes, -tz, tz);
        let longitude_ok = check_degrees(&mut errors, "longitude", raw.longitude, 180.0);
        check_degrees(&mut errors, "latitude", raw.latitude, 90.0);

        // Feb 30 and friends: only meaningful once the parts are in range.
        let date = if year_ok && month_ok && day_ok {
            let d = NaiveDate::from_ymd_opt(raw.year as i32, raw.month as u32, raw.day as u32);
            if d.is_none() {
                errors.push(FieldError::new(
                    "day",
                    format!(
                        "{:04}-{:02} has no day {}",
                        raw.year, raw.month, raw.day
                    ),
                ));
            }
            d
        } else {
            None
        };

        let solar_time = match solar_mode_from_code(&raw.solar_time_mode, raw.longitude) {
            Some(Ok(mode)) => Some(mode),
            Some(Err(())) => {
                errors.push(FieldError::new(
                    "longitude",
                    format!("solar_time_mode {} requires a longitude", raw.solar_time_mode),
                ));
                None
            }
            None => {
                errors.push(FieldError::new(
                    "solar_time_mode",
                    format!("{:?} is not one of NONE, LMT, TST", raw.solar_time_mode),
                ));
                None
            }
        };
        if let (Some(mode), true, true) = (solar_time, tz_ok, longitude_ok) {
            check_meridian_gap(&mut errors, mode, raw.tz_offset_minutes as i32);
        }
        let zi_hour = ZiHourMode::from_code(&raw.zi_hour_mode);
        if zi_hour.is_none() {
            errors.push(FieldError::new(
                "zi_hour_mode",
                format!("{:?} is not one of EARLY, LATE", raw.zi_hour_mode),
            ));
        }
        let day_boundary = match &raw.day_boundary_mode {
            None => Some(DayBoundaryMode::default()),
            Some(code) => {
                let mode = DayBoundaryMode::from_code(code);
                if mode.is_none() {
                    errors.push(FieldError::new(
                        "day_boundary_mode",
                        format!("{code:?} is not one of CIVIL_MIDNIGHT, SOLAR_MIDNIGHT"),
                    ));
                }
                mode
            }
        };

        let local = date.and_then(|d| {
            d.and_hms_opt(
                raw.hour as u32,
                raw.minute as u32,
                raw.second.unwrap_or(0) as u32,
            )
        });

        match (local, solar_time, zi_hour, day_boundary) {
            (Some(local), Some(solar_time), Some(zi_hour), Some(day_boundary))
                if errors.is_empty() =>
            {
                Ok(BirthInput {
                    local,
                    tz_offset_minutes: raw.tz_offset_minutes as i32,
                    latitude_deg: raw.latitude,
                    solar_time,
                    zi_hour,
                    day_boundary,
                })
            }
            _ => {
                tracing::debug!(count = errors.len(), "birth input rejected");
                Err(ValidationErrors(errors))
            }
        }
    }

    /// Checks an already-typed input can still fail: year coverage, offset
    /// and coordinate ranges, and the meridian gap.
    pub fn check(&self, input: &BirthInput) -> Result<(), ValidationErrors> {
        use chrono::Datelike;

        let mut errors = Vec::new();
        check_range(
            &mut errors,
            "year",
            i64::from(input.local.year()),
            i64::from(self.min_year),
            i64::from(self.max_year),
        );
        let tz = i64::from(MAX_TZ_OFFSET_MINUTES);
        let tz_ok = check_range(
            &mut errors,
            "tz_offset_minutes",
            i64::from(input.tz_offset_minutes),
            -tz,
            tz,
        );
        let longitude_ok = check_degrees(&mut errors, "longitude", input.longitude_deg(), 180.0);
        check_degrees(&mut errors, "latitude", input.latitude_deg, 90.0);
        if tz_ok && longitude_ok {
            check_meridian_gap(&mut errors, input.solar_time, input.tz_offset_minutes);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}
