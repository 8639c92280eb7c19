//! Year, month, day and hour pillar algorithms.
//!
//! Year and month boundaries are physical instants, so they are compared
//! against the UTC instant of the civil reading; both take the latest
//! boundary at or before it. Day and hour pillars read a wall clock: the
//! solar-corrected one by default. The hour stem always follows the clock's
//! own date, even when the EARLY zi-hour rule moves the day pillar forward.
//!
//! Fallbacks when the term chain has no usable entry:
//! - year: turns at local 02-04 00:00
//! - month: civil month number mapped to a branch (1 -> 丑, 2 -> 寅, ... 12 -> 子)

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::Serialize;
use sizhu_base::{Branch, Pillar, Stem, hour_pillar, month_pillar, year_pillar};
use sizhu_terms::{SolarTerm, SolarTermRecord, SolarTermResolver, TermSource};
use sizhu_time::{SECONDS_PER_DAY, SolarTimeCorrection, local_to_utc};

use crate::input::{BirthInput, DayBoundaryMode, ZiHourMode};
use crate::pillars::FourPillars;
use crate::trace::{TraceStage, Tracer};

/// Days from 0001-01-01 (day 1) to 1985-09-22, a 甲子 day.
pub const DAY_EPOCH_DAYS_FROM_CE: i32 = 724_906;

/// A latest 立春 older than this means the chain lacks the following one.
const LICHUN_MAX_GAP_DAYS: i64 = 366;

/// A latest sectional term older than this is treated as missing; the
/// longest gap between consecutive sectional terms is about 31.5 days.
const SECTIONAL_MAX_GAP_DAYS: i64 = 32;

/// Heuristic 立春 date (month, day) used without data.
const HEURISTIC_LICHUN: (u32, u32) = (2, 4);

/// How the year pillar was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearResolution {
    pub pillar: Pillar,
    /// Year after the 立春 adjustment.
    pub actual_year: i32,
    /// The 立春 compared against; `None` when the heuristic fired.
    pub boundary: Option<SolarTermRecord>,
    pub source: TermSource,
}

/// How the month pillar was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthResolution {
    pub pillar: Pillar,
    /// The sectional term opening the month; `None` when the heuristic fired.
    pub boundary: Option<SolarTermRecord>,
    pub source: TermSource,
}

/// How the day pillar was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayResolution {
    pub pillar: Pillar,
    /// Calendar date the pillar was computed from.
    pub date: NaiveDate,
    /// Whether the EARLY zi-hour rule moved the date forward.
    pub zi_advanced: bool,
}

/// Everything the calculator decided for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillarResolution {
    pub pillars: FourPillars,
    pub instant_utc: DateTime<Utc>,
    pub year: YearResolution,
    pub month: MonthResolution,
    pub day: DayResolution,
}

/// Day pillar of a calendar date.
pub fn day_pillar_for_date(date: NaiveDate) -> Pillar {
    Pillar::from_offset(i64::from(date.num_days_from_ce() - DAY_EPOCH_DAYS_FROM_CE))
}

/// Hour pillar for a clock hour (0..=23) under a day stem.
pub fn hour_pillar_for(day_stem: Stem, clock_hour: u32) -> Pillar {
    hour_pillar(day_stem, Branch::from_hour(clock_hour))
}

/// Pillar algorithms over a solar-term chain.
#[derive(Debug, Clone, Copy)]
pub struct PillarCalculator<'a> {
    resolver: &'a SolarTermResolver,
}

impl<'a> PillarCalculator<'a> {
    pub fn new(resolver: &'a SolarTermResolver) -> Self {
        Self { resolver }
    }

    /// Year pillar for a UTC instant whose civil reading is `local`.
    pub fn year(&self, instant: DateTime<Utc>, local: NaiveDateTime) -> YearResolution {
        self.year_traced(instant, local, &mut Tracer::new(false))
    }

    /// Month pillar; `year_stem` comes from the year pillar of the same instant.
    pub fn month(
        &self,
        instant: DateTime<Utc>,
        local: NaiveDateTime,
        year_stem: Stem,
    ) -> MonthResolution {
        self.month_traced(instant, local, year_stem, &mut Tracer::new(false))
    }

    /// Day pillar for a wall-clock reading under a zi-hour policy.
    pub fn day(&self, clock: NaiveDateTime, zi_hour: ZiHourMode) -> DayResolution {
        day_traced(clock, zi_hour, &mut Tracer::new(false))
    }

    /// All four pillars for a validated input and its solar-time correction.
    pub fn resolve(&self, input: &BirthInput, correction: &SolarTimeCorrection) -> PillarResolution {
        self.resolve_traced(input, correction, &mut Tracer::new(false))
    }

    pub(crate) fn resolve_traced(
        &self,
        input: &BirthInput,
        correction: &SolarTimeCorrection,
        tracer: &mut Tracer,
    ) -> PillarResolution {
        let instant = local_to_utc(input.local, input.tz_offset_minutes);

        let year = self.year_traced(instant, input.local, tracer);
        let month = self.month_traced(instant, input.local, year.pillar.stem(), tracer);

        let day_clock = match input.day_boundary {
            DayBoundaryMode::SolarMidnight => correction.adjusted,
            DayBoundaryMode::CivilMidnight => input.local,
        };
        let day = day_traced(day_clock, input.zi_hour, tracer);

        // The early 子 hour still belongs to the clock's own day.
        let hour_day = if day.zi_advanced {
            day_pillar_for_date(day_clock.date())
        } else {
            day.pillar
        };
        let clock_hour = correction.adjusted.hour();
        let hour = hour_pillar_for(hour_day.stem(), clock_hour);
        tracer.note(TraceStage::Hour, || {
            format!(
                "{:02}:{:02} is the {} hour; day stem {} gives {}",
                clock_hour,
                correction.adjusted.minute(),
                hour.branch(),
                hour_day.stem(),
                hour
            )
        });

        PillarResolution {
            pillars: FourPillars {
                year: year.pillar,
                month: month.pillar,
                day: day.pillar,
                hour,
            },
            instant_utc: instant,
            year,
            month,
            day,
        }
    }

    fn year_traced(
        &self,
        instant: DateTime<Utc>,
        local: NaiveDateTime,
        tracer: &mut Tracer,
    ) -> YearResolution {
        let local_year = local.year();
        let lichun = self
            .resolver
            .latest_occurrence_at_or_before(instant, SolarTerm::Lichun, local_year)
            .filter(|r| (instant - r.instant).num_seconds() <= LICHUN_MAX_GAP_DAYS * SECONDS_PER_DAY);

        match lichun {
            Some(record) => {
                let actual_year = record.year;
                let pillar = year_pillar(actual_year);
                let fallback = record.source != TermSource::Precise;
                let msg = || {
                    format!(
                        "立春 {} at {} ({}); year {actual_year} -> {pillar}",
                        record.year,
                        record.instant.format("%Y-%m-%dT%H:%M:%SZ"),
                        record.source
                    )
                };
                if fallback {
                    tracer.fallback(TraceStage::Year, msg);
                } else {
                    tracer.note(TraceStage::Year, msg);
                }
                YearResolution {
                    pillar,
                    actual_year,
                    boundary: Some(record),
                    source: record.source,
                }
            }
            None => {
                let (m, d) = HEURISTIC_LICHUN;
                let actual_year = if (local.month(), local.day()) >= (m, d) {
                    local_year
                } else {
                    local_year - 1
                };
                let pillar = year_pillar(actual_year);
                tracer.fallback(TraceStage::Year, || {
                    format!(
                        "no 立春 data near {local_year}; year turns at local {m:02}-{d:02}, year {actual_year} -> {pillar}"
                    )
                });
                YearResolution {
                    pillar,
                    actual_year,
                    boundary: None,
                    source: TermSource::Heuristic,
                }
            }
        }
    }

    fn month_traced(
        &self,
        instant: DateTime<Utc>,
        local: NaiveDateTime,
        year_stem: Stem,
        tracer: &mut Tracer,
    ) -> MonthResolution {
        let opening = self
            .resolver
            .latest_sectional_at_or_before(instant, local.year())
            .filter(|r| (instant - r.instant).num_seconds() <= SECTIONAL_MAX_GAP_DAYS * SECONDS_PER_DAY)
            .and_then(|r| r.term.month_branch().map(|b| (r, b)));

        match opening {
            Some((record, branch)) => {
                let pillar = month_pillar(year_stem, branch);
                let msg = || {
                    format!(
                        "{} {} at {} ({}) opens {branch}; year stem {year_stem} gives {pillar}",
                        record.term,
                        record.year,
                        record.instant.format("%Y-%m-%dT%H:%M:%SZ"),
                        record.source
                    )
                };
                if record.source == TermSource::Precise {
                    tracer.note(TraceStage::Month, msg);
                } else {
                    tracer.fallback(TraceStage::Month, msg);
                }
                MonthResolution {
                    pillar,
                    boundary: Some(record),
                    source: record.source,
                }
            }
            None => {
                let branch = heuristic_month_branch(local.month());
                let pillar = month_pillar(year_stem, branch);
                tracer.fallback(TraceStage::Month, || {
                    format!(
                        "no sectional term data; civil month {} maps to {branch}, giving {pillar}",
                        local.month()
                    )
                });
                MonthResolution {
                    pillar,
                    boundary: None,
                    source: TermSource::Heuristic,
                }
            }
        }
    }
}

/// Month branch from a civil month number: 1 -> 丑, 2 -> 寅, ... 12 -> 子.
pub fn heuristic_month_branch(month: u32) -> Branch {
    Branch::from_index((month % 12) as u8)
}

fn day_traced(clock: NaiveDateTime, zi_hour: ZiHourMode, tracer: &mut Tracer) -> DayResolution {
    let advance = zi_hour == ZiHourMode::Early && clock.hour() >= 23;
    let date = if advance {
        clock.date().checked_add_days(Days::new(1)).unwrap_or(clock.date())
    } else {
        clock.date()
    };
    let pillar = day_pillar_for_date(date);
    if advance {
        tracer.note(TraceStage::Day, || {
            format!(
                "{} falls in the early 子 hour; day taken as {date} -> {pillar}",
                clock.format("%Y-%m-%d %H:%M")
            )
        });
    } else {
        tracer.note(TraceStage::Day, || format!("{date} -> {pillar}"));
    }
    DayResolution {
        pillar,
        date,
        zi_advanced: advance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizhu_time::{SolarTimeMode, correct};

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn epoch_is_jiazi() {
        let epoch = NaiveDate::from_ymd_opt(1985, 9, 22).unwrap();
        assert_eq!(epoch.num_days_from_ce(), DAY_EPOCH_DAYS_FROM_CE);
        assert_eq!(day_pillar_for_date(epoch), Pillar::JIAZI);
    }

    #[test]
    fn known_days() {
        let d = |y, m, dd| day_pillar_for_date(NaiveDate::from_ymd_opt(y, m, dd).unwrap()).name();
        assert_eq!(d(1985, 10, 6), "戊寅");
        assert_eq!(d(2000, 1, 1), "戊午");
        assert_eq!(d(1994, 11, 1), "辛卯");
        assert_eq!(d(1994, 10, 31), "庚寅");
        // Superseded 1900-01-31 anchor agrees: it is a 甲辰 day.
        assert_eq!(d(1900, 1, 31), "甲辰");
    }

    #[test]
    fn day_period_sixty() {
        let base = NaiveDate::from_ymd_opt(1850, 1, 1).unwrap();
        for n in (0..90_000u64).step_by(997) {
            let a = base.checked_add_days(Days::new(n)).unwrap();
            let b = a.checked_add_days(Days::new(60)).unwrap();
            assert_eq!(day_pillar_for_date(a), day_pillar_for_date(b));
        }
    }

    #[test]
    fn zi_hour_policies() {
        let r = SolarTermResolver::empty();
        let calc = PillarCalculator::new(&r);
        let late_night = at(1994, 10, 31, 23, 10, 0);
        let early = calc.day(late_night, ZiHourMode::Early);
        assert!(early.zi_advanced);
        assert_eq!(early.pillar.name(), "辛卯");
        let late = calc.day(late_night, ZiHourMode::Late);
        assert!(!late.zi_advanced);
        assert_eq!(late.pillar.name(), "庚寅");
        let after_midnight = calc.day(at(1994, 11, 1, 0, 40, 0), ZiHourMode::Late);
        assert_eq!(after_midnight.pillar.name(), "辛卯");
    }

    #[test]
    fn heuristic_months() {
        assert_eq!(heuristic_month_branch(1), Branch::Chou);
        assert_eq!(heuristic_month_branch(2), Branch::Yin);
        assert_eq!(heuristic_month_branch(10), Branch::Xu);
        assert_eq!(heuristic_month_branch(12), Branch::Zi);
    }

    #[test]
    fn without_data_heuristics_apply() {
        let r = SolarTermResolver::empty();
        let calc = PillarCalculator::new(&r);
        let local = at(1985, 2, 3, 12, 0, 0);
        let instant = local_to_utc(local, 540);
        let y = calc.year(instant, local);
        assert_eq!(y.source, TermSource::Heuristic);
        assert_eq!(y.actual_year, 1984);
        assert_eq!(y.pillar.name(), "甲子");
        let m = calc.month(instant, local, y.pillar.stem());
        assert_eq!(m.source, TermSource::Heuristic);
        assert_eq!(m.pillar.branch(), Branch::Yin);

        let feb4 = at(1985, 2, 4, 0, 0, 0);
        assert_eq!(calc.year(local_to_utc(feb4, 540), feb4).actual_year, 1985);
    }

    #[test]
    fn bundled_regression_vector() {
        let r = SolarTermResolver::bundled();
        let calc = PillarCalculator::new(&r);
        let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540).unwrap();
        let res = calc.resolve(&input, &correct(input.local, 540, SolarTimeMode::None));
        assert_eq!(res.pillars.to_string(), "乙丑 乙酉 戊寅 壬戌");
        assert_eq!(res.year.source, TermSource::Precise);
        assert_eq!(res.month.boundary.map(|b| b.term), Some(SolarTerm::Bailu));
    }

    #[test]
    fn hour_uses_corrected_clock() {
        // 19:30 civil at 126.978 E is 18:57:55 local mean time: 酉, not 戌.
        let r = SolarTermResolver::bundled();
        let calc = PillarCalculator::new(&r);
        let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540)
            .unwrap()
            .with_solar_time(SolarTimeMode::LocalMean {
                longitude_deg: 126.978,
            });
        let res = calc.resolve(&input, &correct(input.local, 540, input.solar_time));
        assert_eq!(res.pillars.hour.name(), "辛酉");
        assert_eq!(res.pillars.day.name(), "戊寅");
    }

    #[test]
    fn civil_midnight_keeps_civil_date() {
        // 00:10 civil at 126.978 E is 23:37:55 the previous day.
        let r = SolarTermResolver::bundled();
        let calc = PillarCalculator::new(&r);
        let base = BirthInput::from_ymd_hms(1994, 11, 1, 0, 10, 0, 540)
            .unwrap()
            .with_solar_time(SolarTimeMode::LocalMean {
                longitude_deg: 126.978,
            })
            .with_zi_hour(ZiHourMode::Late);
        let corr = correct(base.local, 540, base.solar_time);
        assert_eq!(corr.day_delta, -1);

        let solar = calc.resolve(&base, &corr);
        assert_eq!(solar.day.date, NaiveDate::from_ymd_opt(1994, 10, 31).unwrap());
        assert_eq!(solar.pillars.day.name(), "庚寅");

        let civil = calc.resolve(&base.with_day_boundary(DayBoundaryMode::CivilMidnight), &corr);
        assert_eq!(civil.day.date, NaiveDate::from_ymd_opt(1994, 11, 1).unwrap());
        assert_eq!(civil.pillars.day.name(), "辛卯");
        assert_eq!(civil.pillars.hour.branch(), Branch::Zi);
    }

    #[test]
    fn early_zi_hour_stem_follows_clock_day() {
        let r = SolarTermResolver::bundled();
        let calc = PillarCalculator::new(&r);
        let input = BirthInput::from_ymd_hms(1994, 10, 31, 23, 10, 0, 540).unwrap();
        let corr = correct(input.local, 540, SolarTimeMode::None);

        let early = calc.resolve(&input, &corr);
        assert!(early.day.zi_advanced);
        assert_eq!(early.pillars.day.name(), "辛卯");
        // 庚 day: the 子 hour is 丙子, not the 戊子 of the following 辛 day.
        assert_eq!(early.pillars.hour.name(), "丙子");

        let late = calc.resolve(&input.with_zi_hour(ZiHourMode::Late), &corr);
        assert_eq!(late.pillars.day.name(), "庚寅");
        assert_eq!(late.pillars.hour, early.pillars.hour);
    }

    #[test]
    fn year_uses_lichun_that_opened_it() {
        let r = SolarTermResolver::bundled();
        let calc = PillarCalculator::new(&r);
        let autumn = at(1985, 10, 6, 19, 30, 0);
        let y = calc.year(local_to_utc(autumn, 540), autumn);
        assert_eq!(y.actual_year, 1985);
        assert_eq!(y.boundary.map(|b| b.year), Some(1985));

        // The next 立春 is past the end of the data; the 2100 one still applies.
        let last = at(2100, 10, 1, 12, 0, 0);
        let y = calc.year(local_to_utc(last, 0), last);
        assert_eq!(y.source, TermSource::Precise);
        assert_eq!(y.actual_year, 2100);
        assert_eq!(y.pillar.name(), "庚申");
    }
}
