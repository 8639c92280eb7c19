//! Golden checks of the bundled datasets through the resolver chain.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sizhu_base::Branch;
use sizhu_terms::{
    ALL_SOLAR_TERMS, SolarTerm, SolarTermResolver, TermProvider, TermSource, TermTable,
    bundled_coarse,
};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// 1985 立春 at 21:11:48 UTC (1985-02-04 06:11 KST).
#[test]
fn lichun_1985() {
    let r = SolarTermResolver::bundled();
    let hit = r.resolve(SolarTerm::Lichun, 1985).unwrap();
    assert_eq!(hit.source, TermSource::Precise);
    assert_eq!(hit.instant, utc(1985, 2, 3, 21, 11, 48));
}

/// 1994 寒露 at 12:29:01 UTC separates the 酉 and 戌 months.
#[test]
fn hanlu_1994_splits_months() {
    let r = SolarTermResolver::bundled();
    let before = utc(1994, 10, 7, 21, 0, 0);
    let after = utc(1994, 10, 9, 1, 0, 0);
    let b = r.latest_sectional_at_or_before(before, 1994).unwrap();
    let a = r.latest_sectional_at_or_before(after, 1994).unwrap();
    assert_eq!(b.term, SolarTerm::Bailu);
    assert_eq!(b.term.month_branch(), Some(Branch::You));
    assert_eq!(a.term, SolarTerm::Hanlu);
    assert_eq!(a.term.month_branch(), Some(Branch::Xu));
    assert_eq!(a.instant, utc(1994, 10, 8, 12, 29, 1));
}

/// A boundary instant itself belongs to the month it opens.
#[test]
fn boundary_is_inclusive() {
    let r = SolarTermResolver::bundled();
    let t = utc(1994, 10, 8, 12, 29, 1);
    assert_eq!(
        r.latest_sectional_at_or_before(t, 1994).map(|h| h.term),
        Some(SolarTerm::Hanlu)
    );
    let just_before = utc(1994, 10, 8, 12, 29, 0);
    assert_eq!(
        r.latest_sectional_at_or_before(just_before, 1994).map(|h| h.term),
        Some(SolarTerm::Bailu)
    );
}

/// New Year's Day 2000 sits in the 子 month opened by 1999 大雪.
#[test]
fn new_year_belongs_to_previous_daxue() {
    let r = SolarTermResolver::bundled();
    let t = utc(2000, 1, 1, 3, 0, 0);
    let hit = r.latest_sectional_at_or_before(t, 2000).unwrap();
    assert_eq!(hit.term, SolarTerm::Daxue);
    assert_eq!(hit.year, 1999);
    assert_eq!(hit.instant, utc(1999, 12, 7, 13, 47, 31));
}

/// Nearest 立春 to a spring instant is the one in the same year; by
/// October the following February is nearer.
#[test]
fn nearest_lichun_by_season() {
    let r = SolarTermResolver::bundled();
    let nearest = |t| r.nearest_occurrence(t, SolarTerm::Lichun, 1985).map(|h| h.year);
    assert_eq!(nearest(utc(1985, 5, 1, 0, 0, 0)), Some(1985));
    assert_eq!(nearest(utc(1985, 10, 6, 10, 30, 0)), Some(1986));
}

/// An October instant still sits under that year's 立春, not the nearer one
/// of the following February.
#[test]
fn latest_lichun_same_year() {
    let r = SolarTermResolver::bundled();
    let hit = r
        .latest_occurrence_at_or_before(utc(1985, 10, 6, 10, 30, 0), SolarTerm::Lichun, 1985)
        .unwrap();
    assert_eq!(hit.year, 1985);
    assert_eq!(hit.instant, utc(1985, 2, 3, 21, 11, 48));
}

/// Before 1900 only the coarse tier answers.
#[test]
fn coarse_tier_before_1900() {
    let r = SolarTermResolver::bundled();
    let hit = r.resolve(SolarTerm::Lichun, 1899).unwrap();
    assert_eq!(hit.source, TermSource::Coarse);
    assert_eq!(hit.instant, utc(1899, 2, 4, 0, 0, 0));
    assert_eq!(r.resolve(SolarTerm::Lichun, 1849), None);
    assert_eq!(r.resolve(SolarTerm::Lichun, 2101), None);
}

/// Terms in a bundled year are strictly increasing and about 15 days apart.
#[test]
fn terms_monotonic_within_year() {
    let r = SolarTermResolver::bundled();
    for year in [1900, 1950, 1985, 2000, 2050, 2100] {
        let instants: Vec<DateTime<Utc>> = ALL_SOLAR_TERMS
            .iter()
            .map(|&t| r.resolve_instant(t, year).unwrap())
            .collect();
        for pair in instants.windows(2) {
            let gap = (pair[1] - pair[0]).num_hours();
            assert!((13 * 24..=17 * 24).contains(&gap), "{year}: gap {gap}h");
        }
    }
}

/// Coarse dates agree with the precise instants to within a day.
#[test]
fn tiers_agree() {
    let precise = sizhu_terms::bundled_precise();
    let coarse = bundled_coarse();
    for year in (1900..=2100).step_by(7) {
        for t in ALL_SOLAR_TERMS {
            let p = precise.lookup(t, year).unwrap();
            let c = coarse.lookup(t, year).unwrap();
            let diff = (p - c).num_seconds();
            assert!((-86_400..=2 * 86_400).contains(&diff), "{year} {t}: {diff}");
        }
    }
}

/// A user-supplied precise file can replace the bundled tier.
#[test]
fn custom_precise_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "year,term,instant").unwrap();
    writeln!(file, "2030,Lichun,2030-02-04T02:08:00Z").unwrap();
    file.flush().unwrap();

    let table = TermTable::load_precise(file.path()).unwrap();
    let custom: Arc<dyn TermProvider> = Arc::new(table);
    let coarse: Arc<dyn TermProvider> = bundled_coarse();
    let r = SolarTermResolver::new(vec![custom, coarse]);
    assert_eq!(
        r.resolve(SolarTerm::Lichun, 2030).map(|h| h.source),
        Some(TermSource::Precise)
    );
    assert_eq!(
        r.resolve(SolarTerm::Jingzhe, 2030).map(|h| h.source),
        Some(TermSource::Coarse)
    );
}
