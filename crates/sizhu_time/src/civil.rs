//! Civil clock time with a fixed UTC offset.
//!
//! Birth times arrive as a wall-clock reading plus an offset in minutes east
//! of Greenwich. The physical instant is `local - offset`.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Largest timezone offset in use anywhere (UTC+14:00 / UTC-14:00 bound).
pub const MAX_TZ_OFFSET_MINUTES: i32 = 840;

/// Degrees of longitude per hour of timezone offset.
const DEG_PER_HOUR: f64 = 15.0;

/// Convert a civil clock reading to its UTC instant.
pub fn local_to_utc(local: NaiveDateTime, tz_offset_minutes: i32) -> DateTime<Utc> {
    (local - Duration::minutes(i64::from(tz_offset_minutes))).and_utc()
}

/// Convert a UTC instant to the civil clock reading at a fixed offset.
pub fn utc_to_local(instant: DateTime<Utc>, tz_offset_minutes: i32) -> NaiveDateTime {
    instant.naive_utc() + Duration::minutes(i64::from(tz_offset_minutes))
}

/// Standard meridian (degrees east) implied by a timezone offset.
///
/// `offset_minutes / 60 * 15`, so UTC+9 gives 135 E and UTC+5:30 gives 82.5 E.
pub fn standard_meridian_deg(tz_offset_minutes: i32) -> f64 {
    f64::from(tz_offset_minutes) / 60.0 * DEG_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn kst_to_utc() {
        let utc = local_to_utc(local(1985, 10, 6, 19, 30), 540);
        assert_eq!(utc.to_rfc3339(), "1985-10-06T10:30:00+00:00");
    }

    #[test]
    fn negative_offset_crosses_date() {
        let utc = local_to_utc(local(2000, 1, 1, 20, 0), -300);
        assert_eq!(utc.naive_utc(), local(2000, 1, 2, 1, 0));
    }

    #[test]
    fn utc_local_roundtrip() {
        let l = local(1994, 10, 31, 23, 10);
        let back = utc_to_local(local_to_utc(l, 345), 345);
        assert_eq!(back, l);
        assert_eq!(back.minute(), 10);
    }

    #[test]
    fn meridians() {
        assert!((standard_meridian_deg(540) - 135.0).abs() < 1e-12);
        assert!((standard_meridian_deg(330) - 82.5).abs() < 1e-12);
        assert!((standard_meridian_deg(-300) + 75.0).abs() < 1e-12);
        assert_eq!(standard_meridian_deg(0), 0.0);
    }
}
