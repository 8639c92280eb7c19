//! Provider chain and boundary searches.
//!
//! Providers are tried in order; the first hit for a (term, year) wins.
//! Searches around an instant look at the local year and both neighbours,
//! since a boundary near January 1 may sit in the adjacent Gregorian year
//! once the timezone is applied.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::provider::{TermProvider, TermSource, bundled_coarse, bundled_precise};
use crate::solar_term::{SECTIONAL_TERMS, SolarTerm};

/// A resolved boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTermRecord {
    pub term: SolarTerm,
    /// Dataset year the entry was keyed under.
    pub year: i32,
    pub instant: DateTime<Utc>,
    pub source: TermSource,
}

/// Ordered chain of term providers.
#[derive(Clone)]
pub struct SolarTermResolver {
    providers: Vec<Arc<dyn TermProvider>>,
}

impl std::fmt::Debug for SolarTermResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolarTermResolver")
            .field(
                "providers",
                &self
                    .providers
                    .iter()
                    .map(|p| (p.source(), p.year_range()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SolarTermResolver {
    /// Chain over `providers`, highest priority first.
    pub fn new(providers: Vec<Arc<dyn TermProvider>>) -> Self {
        Self { providers }
    }

    /// Bundled precise table, then bundled coarse table.
    pub fn bundled() -> Self {
        let precise: Arc<dyn TermProvider> = bundled_precise();
        let coarse: Arc<dyn TermProvider> = bundled_coarse();
        Self::new(vec![precise, coarse])
    }

    /// No providers: every lookup misses and callers fall back to heuristics.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn providers(&self) -> &[Arc<dyn TermProvider>] {
        &self.providers
    }

    /// Resolve `term` in `year` through the chain.
    pub fn resolve(&self, term: SolarTerm, year: i32) -> Option<SolarTermRecord> {
        let (tier, provider, instant) = self
            .providers
            .iter()
            .enumerate()
            .find_map(|(tier, p)| p.lookup(term, year).map(|t| (tier, p, t)))?;
        if tier > 0 {
            tracing::debug!(
                term = term.name(),
                year,
                source = %provider.source(),
                "solar term resolved from fallback tier"
            );
        }
        Some(SolarTermRecord {
            term,
            year,
            instant,
            source: provider.source(),
        })
    }

    /// Instant only; `None` when no tier knows the entry.
    pub fn resolve_instant(&self, term: SolarTerm, year: i32) -> Option<DateTime<Utc>> {
        self.resolve(term, year).map(|r| r.instant)
    }

    /// Occurrence of `term` closest in time to `instant`, searching
    /// `local_year - 1 ..= local_year + 1`. Ties go to the earlier year.
    ///
    /// From late summer on this is usually the coming year's entry; pillar
    /// boundaries want [`Self::latest_occurrence_at_or_before`].
    pub fn nearest_occurrence(
        &self,
        instant: DateTime<Utc>,
        term: SolarTerm,
        local_year: i32,
    ) -> Option<SolarTermRecord> {
        (local_year - 1..=local_year + 1)
            .filter_map(|y| self.resolve(term, y))
            .min_by_key(|r| (r.instant - instant).num_seconds().abs())
    }

    /// Latest occurrence of `term` at or before `instant`, searching the
    /// same three-year window.
    pub fn latest_occurrence_at_or_before(
        &self,
        instant: DateTime<Utc>,
        term: SolarTerm,
        local_year: i32,
    ) -> Option<SolarTermRecord> {
        (local_year - 1..=local_year + 1)
            .filter_map(|y| self.resolve(term, y))
            .filter(|r| r.instant <= instant)
            .max_by_key(|r| r.instant)
    }

    /// Latest sectional (month-opening) boundary at or before `instant`,
    /// searching the same three-year window.
    pub fn latest_sectional_at_or_before(
        &self,
        instant: DateTime<Utc>,
        local_year: i32,
    ) -> Option<SolarTermRecord> {
        let mut boundaries: Vec<SolarTermRecord> = (local_year - 1..=local_year + 1)
            .flat_map(|y| SECTIONAL_TERMS.iter().map(move |&t| (t, y)))
            .filter_map(|(t, y)| self.resolve(t, y))
            .collect();
        boundaries.sort_by_key(|r| r.instant);
        boundaries.into_iter().rev().find(|r| r.instant <= instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TermTable;
    use chrono::TimeZone;

    fn chain(precise: &str, coarse: &str) -> SolarTermResolver {
        let p: Arc<dyn TermProvider> = Arc::new(TermTable::precise_from_csv_str(precise).unwrap());
        let c: Arc<dyn TermProvider> = Arc::new(TermTable::coarse_from_csv_str(coarse).unwrap());
        SolarTermResolver::new(vec![p, c])
    }

    #[test]
    fn precise_wins_over_coarse() {
        let r = chain(
            "year,term,instant\n2000,立春,2000-02-04T12:40:29Z\n",
            "year,term,date\n2000,立春,2000-02-04\n2001,立春,2001-02-03\n",
        );
        let hit = r.resolve(SolarTerm::Lichun, 2000).unwrap();
        assert_eq!(hit.source, TermSource::Precise);
        assert_eq!(hit.instant, Utc.with_ymd_and_hms(2000, 2, 4, 12, 40, 29).unwrap());

        let fallback = r.resolve(SolarTerm::Lichun, 2001).unwrap();
        assert_eq!(fallback.source, TermSource::Coarse);
        assert_eq!(fallback.instant, Utc.with_ymd_and_hms(2001, 2, 3, 0, 0, 0).unwrap());

        assert_eq!(r.resolve(SolarTerm::Lichun, 2002), None);
    }

    #[test]
    fn empty_chain_misses() {
        let r = SolarTermResolver::empty();
        assert_eq!(r.resolve_instant(SolarTerm::Lichun, 2000), None);
        let t = Utc.with_ymd_and_hms(2000, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(r.nearest_occurrence(t, SolarTerm::Lichun, 2000), None);
        assert_eq!(r.latest_occurrence_at_or_before(t, SolarTerm::Lichun, 2000), None);
        assert_eq!(r.latest_sectional_at_or_before(t, 2000), None);
    }

    #[test]
    fn nearest_picks_adjacent_year() {
        let r = chain(
            "year,term,instant\n1999,大雪,1999-12-07T13:47:31Z\n2000,大雪,2000-12-06T19:37:00Z\n",
            "year,term,date\n",
        );
        // Early January is closer to the previous December's 大雪.
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 3, 0, 0).unwrap();
        let hit = r.nearest_occurrence(t, SolarTerm::Daxue, 2000).unwrap();
        assert_eq!(hit.year, 1999);
    }

    #[test]
    fn latest_occurrence_reaches_previous_year() {
        let r = chain(
            "year,term,instant\n1999,大雪,1999-12-07T13:47:31Z\n2000,大雪,2000-12-06T19:37:00Z\n",
            "year,term,date\n",
        );
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 3, 0, 0).unwrap();
        let hit = r.latest_occurrence_at_or_before(t, SolarTerm::Daxue, 2000).unwrap();
        assert_eq!(hit.year, 1999);
    }

    #[test]
    fn latest_occurrence_ignores_upcoming() {
        let r = chain(
            "year,term,instant\n\
             1999,立春,1999-02-04T06:57:07Z\n\
             2000,立春,2000-02-04T12:40:29Z\n",
            "year,term,date\n2001,立春,2001-02-03\n",
        );
        // November is nearer the next 立春 but still belongs to the one before.
        let nov = Utc.with_ymd_and_hms(2000, 11, 20, 0, 0, 0).unwrap();
        let hit = r.latest_occurrence_at_or_before(nov, SolarTerm::Lichun, 2000).unwrap();
        assert_eq!((hit.year, hit.source), (2000, TermSource::Precise));
        assert_eq!(r.nearest_occurrence(nov, SolarTerm::Lichun, 2000).map(|h| h.year), Some(2001));

        let exact = Utc.with_ymd_and_hms(2000, 2, 4, 12, 40, 29).unwrap();
        assert_eq!(
            r.latest_occurrence_at_or_before(exact, SolarTerm::Lichun, 2000).map(|h| h.year),
            Some(2000)
        );
        let jan = Utc.with_ymd_and_hms(2000, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            r.latest_occurrence_at_or_before(jan, SolarTerm::Lichun, 2000).map(|h| h.year),
            Some(1999)
        );
        let late_2001 = Utc.with_ymd_and_hms(2001, 3, 1, 0, 0, 0).unwrap();
        let coarse = r.latest_occurrence_at_or_before(late_2001, SolarTerm::Lichun, 2001).unwrap();
        assert_eq!((coarse.year, coarse.source), (2001, TermSource::Coarse));

        let before = Utc.with_ymd_and_hms(1998, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(r.latest_occurrence_at_or_before(before, SolarTerm::Lichun, 1998), None);
    }

    #[test]
    fn latest_sectional_orders_across_years() {
        let r = chain(
            "year,term,instant\n\
             1999,大雪,1999-12-07T13:47:31Z\n\
             2000,小寒,2000-01-06T01:00:46Z\n\
             2000,立春,2000-02-04T12:40:29Z\n",
            "year,term,date\n",
        );
        let jan1 = Utc.with_ymd_and_hms(2000, 1, 1, 3, 0, 0).unwrap();
        assert_eq!(
            r.latest_sectional_at_or_before(jan1, 2000).map(|h| h.term),
            Some(SolarTerm::Daxue)
        );
        let jan6 = Utc.with_ymd_and_hms(2000, 1, 6, 1, 0, 46).unwrap();
        assert_eq!(
            r.latest_sectional_at_or_before(jan6, 2000).map(|h| h.term),
            Some(SolarTerm::Xiaohan)
        );
        let before = Utc.with_ymd_and_hms(1999, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(r.latest_sectional_at_or_before(before, 1999), None);
    }
}
