//! Birth input: the raw record as received and the validated form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sizhu_time::SolarTimeMode;

/// Which calendar day the 23:00-23:59 part of the 子 hour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ZiHourMode {
    /// The day turns at 23:00.
    #[default]
    #[serde(rename = "EARLY")]
    Early,
    /// The day turns at 00:00; 23:xx stays on the current day.
    #[serde(rename = "LATE")]
    Late,
}

impl ZiHourMode {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Early => "EARLY",
            Self::Late => "LATE",
        }
    }

    /// Case-insensitive parse of `EARLY` / `LATE`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EARLY" => Some(Self::Early),
            "LATE" => Some(Self::Late),
            _ => None,
        }
    }
}

/// Which clock decides the calendar date of the day pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayBoundaryMode {
    /// Civil date and civil hour, even when a solar-time correction is active.
    #[serde(rename = "CIVIL_MIDNIGHT")]
    CivilMidnight,
    /// Solar-corrected date and hour.
    #[default]
    #[serde(rename = "SOLAR_MIDNIGHT")]
    SolarMidnight,
}

impl DayBoundaryMode {
    pub const fn code(self) -> &'static str {
        match self {
            Self::CivilMidnight => "CIVIL_MIDNIGHT",
            Self::SolarMidnight => "SOLAR_MIDNIGHT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CIVIL_MIDNIGHT" | "CIVIL" => Some(Self::CivilMidnight),
            "SOLAR_MIDNIGHT" | "SOLAR" => Some(Self::SolarMidnight),
            _ => None,
        }
    }
}

/// Parse a solar-time mode code together with the longitude it needs.
///
/// `Ok(None)` for an unknown code; `Err(())` when the code needs a longitude
/// and none was given.
pub(crate) fn solar_mode_from_code(
    code: &str,
    longitude_deg: Option<f64>,
) -> Option<Result<SolarTimeMode, ()>> {
    let build = |f: fn(f64) -> SolarTimeMode| Some(longitude_deg.map(f).ok_or(()));
    match code.trim().to_ascii_uppercase().as_str() {
        "NONE" | "" => Some(Ok(SolarTimeMode::None)),
        "LMT" => build(|longitude_deg| SolarTimeMode::LocalMean { longitude_deg }),
        "TST" => build(|longitude_deg| SolarTimeMode::TrueSolar { longitude_deg }),
        _ => None,
    }
}

/// Birth record as it arrives from a form, file or API.
///
/// Numeric fields are wide so out-of-range values reach the validator
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBirthInput {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: Option<i64>,
    /// Minutes east of UTC.
    pub tz_offset_minutes: i64,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// `NONE`, `LMT` or `TST`.
    pub solar_time_mode: String,
    /// `EARLY` or `LATE`.
    pub zi_hour_mode: String,
    /// `CIVIL_MIDNIGHT` or `SOLAR_MIDNIGHT`; absent means the default.
    pub day_boundary_mode: Option<String>,
}

impl Default for RawBirthInput {
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: None,
            tz_offset_minutes: 0,
            longitude: None,
            latitude: None,
            solar_time_mode: SolarTimeMode::None.code().to_string(),
            zi_hour_mode: ZiHourMode::Early.code().to_string(),
            day_boundary_mode: None,
        }
    }
}

/// A validated birth input.
///
/// The longitude lives inside [`SolarTimeMode`], so a correction without a
/// longitude cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthInput {
    /// Civil wall-clock reading.
    pub local: NaiveDateTime,
    /// Minutes east of UTC.
    pub tz_offset_minutes: i32,
    /// Informational; no calculation reads it.
    pub latitude_deg: Option<f64>,
    pub solar_time: SolarTimeMode,
    pub zi_hour: ZiHourMode,
    pub day_boundary: DayBoundaryMode,
}

impl BirthInput {
    /// Input with default modes (no solar correction, EARLY zi hour).
    pub fn new(local: NaiveDateTime, tz_offset_minutes: i32) -> Self {
        Self {
            local,
            tz_offset_minutes,
            latitude_deg: None,
            solar_time: SolarTimeMode::None,
            zi_hour: ZiHourMode::default(),
            day_boundary: DayBoundaryMode::default(),
        }
    }

    /// Input from calendar fields; `None` for an impossible date or time.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        tz_offset_minutes: i32,
    ) -> Option<Self> {
        let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
        Some(Self::new(local, tz_offset_minutes))
    }

    pub fn with_solar_time(mut self, mode: SolarTimeMode) -> Self {
        self.solar_time = mode;
        self
    }

    pub fn with_zi_hour(mut self, mode: ZiHourMode) -> Self {
        self.zi_hour = mode;
        self
    }

    pub fn with_day_boundary(mut self, mode: DayBoundaryMode) -> Self {
        self.day_boundary = mode;
        self
    }

    pub fn with_latitude(mut self, latitude_deg: f64) -> Self {
        self.latitude_deg = Some(latitude_deg);
        self
    }

    pub fn longitude_deg(&self) -> Option<f64> {
        self.solar_time.longitude_deg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_codes() {
        assert_eq!(ZiHourMode::from_code("late"), Some(ZiHourMode::Late));
        assert_eq!(ZiHourMode::from_code("EARLY"), Some(ZiHourMode::Early));
        assert_eq!(ZiHourMode::from_code("middle"), None);
        assert_eq!(
            DayBoundaryMode::from_code("civil_midnight"),
            Some(DayBoundaryMode::CivilMidnight)
        );
        assert_eq!(DayBoundaryMode::default(), DayBoundaryMode::SolarMidnight);
        assert_eq!(ZiHourMode::default(), ZiHourMode::Early);
    }

    #[test]
    fn solar_mode_needs_longitude() {
        assert_eq!(solar_mode_from_code("none", None), Some(Ok(SolarTimeMode::None)));
        assert_eq!(
            solar_mode_from_code("TST", Some(126.978)),
            Some(Ok(SolarTimeMode::TrueSolar {
                longitude_deg: 126.978
            }))
        );
        assert_eq!(solar_mode_from_code("LMT", None), Some(Err(())));
        assert_eq!(solar_mode_from_code("GMT", Some(0.0)), None);
    }

    #[test]
    fn builders() {
        let b = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540)
            .unwrap()
            .with_zi_hour(ZiHourMode::Late)
            .with_solar_time(SolarTimeMode::LocalMean {
                longitude_deg: 126.978,
            });
        assert_eq!(b.zi_hour, ZiHourMode::Late);
        assert_eq!(b.longitude_deg(), Some(126.978));
        assert!(BirthInput::from_ymd_hms(1994, 2, 30, 0, 0, 0, 0).is_none());
    }

    #[test]
    fn raw_from_json_uses_defaults() {
        let raw: RawBirthInput = serde_json::from_str(
            r#"{"year":1985,"month":10,"day":6,"hour":19,"minute":30,"tz_offset_minutes":540}"#,
        )
        .unwrap();
        assert_eq!(raw.solar_time_mode, "NONE");
        assert_eq!(raw.zi_hour_mode, "EARLY");
        assert_eq!(raw.second, None);
    }
}
