//! Solar-term dataset providers.
//!
//! A provider answers one question: "when does `term` fall in `year`?".
//! Two tabular providers back the resolver chain: a precise per-second table
//! and a coarse date-only table whose entries are taken as 00:00 UTC.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TermDataError;
use crate::solar_term::SolarTerm;

/// Tier a boundary instant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSource {
    /// Per-second dataset.
    Precise,
    /// Date-only dataset, 00:00 UTC.
    Coarse,
    /// No dataset entry; a fixed calendar rule was applied.
    Heuristic,
}

impl TermSource {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Precise => "precise",
            Self::Coarse => "coarse",
            Self::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for TermSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One tier of the resolution chain.
pub trait TermProvider: Send + Sync {
    /// Tier reported for hits from this provider.
    fn source(&self) -> TermSource;

    /// UTC instant of `term` in Gregorian `year`, if known.
    fn lookup(&self, term: SolarTerm, year: i32) -> Option<DateTime<Utc>>;

    /// Inclusive year span covered, `None` when empty.
    fn year_range(&self) -> Option<(i32, i32)>;
}

#[derive(Debug, Deserialize)]
struct PreciseRow {
    year: i32,
    term: String,
    instant: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CoarseRow {
    year: i32,
    term: String,
    date: NaiveDate,
}

/// An in-memory table of term instants keyed by (year, term).
#[derive(Debug, Clone)]
pub struct TermTable {
    source: TermSource,
    entries: HashMap<(i32, SolarTerm), DateTime<Utc>>,
    years: Option<(i32, i32)>,
}

impl TermTable {
    /// A table with no entries; every lookup misses.
    pub fn empty(source: TermSource) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            years: None,
        }
    }

    /// Parse a precise dataset (`year,term,instant`, RFC 3339 UTC).
    pub fn precise_from_reader<R: Read>(reader: R) -> Result<Self, TermDataError> {
        let mut table = Self::empty(TermSource::Precise);
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for (i, row) in rdr.deserialize::<PreciseRow>().enumerate() {
            let row = row?;
            table.insert(line_of(i), row.year, &row.term, row.instant)?;
        }
        Ok(table)
    }

    /// Parse a coarse dataset (`year,term,date`); each date is 00:00 UTC.
    pub fn coarse_from_reader<R: Read>(reader: R) -> Result<Self, TermDataError> {
        let mut table = Self::empty(TermSource::Coarse);
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for (i, row) in rdr.deserialize::<CoarseRow>().enumerate() {
            let row = row?;
            let instant = row.date.and_time(chrono::NaiveTime::MIN).and_utc();
            table.insert(line_of(i), row.year, &row.term, instant)?;
        }
        Ok(table)
    }

    pub fn precise_from_csv_str(text: &str) -> Result<Self, TermDataError> {
        Self::precise_from_reader(text.as_bytes())
    }

    pub fn coarse_from_csv_str(text: &str) -> Result<Self, TermDataError> {
        Self::coarse_from_reader(text.as_bytes())
    }

    /// Load a precise dataset from a CSV file.
    pub fn load_precise(path: impl AsRef<Path>) -> Result<Self, TermDataError> {
        Self::precise_from_reader(std::fs::File::open(path)?)
    }

    /// Load a coarse dataset from a CSV file.
    pub fn load_coarse(path: impl AsRef<Path>) -> Result<Self, TermDataError> {
        Self::coarse_from_reader(std::fs::File::open(path)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(
        &mut self,
        line: u64,
        year: i32,
        name: &str,
        instant: DateTime<Utc>,
    ) -> Result<(), TermDataError> {
        let term = SolarTerm::from_name(name).ok_or_else(|| TermDataError::UnknownTerm {
            line,
            name: name.to_string(),
        })?;
        if instant.year() != year {
            return Err(TermDataError::YearMismatch {
                line,
                year,
                term: term.name().to_string(),
            });
        }
        if self.entries.insert((year, term), instant).is_some() {
            return Err(TermDataError::Duplicate {
                line,
                year,
                term: term.name().to_string(),
            });
        }
        self.years = Some(match self.years {
            Some((lo, hi)) => (lo.min(year), hi.max(year)),
            None => (year, year),
        });
        Ok(())
    }
}

impl TermProvider for TermTable {
    fn source(&self) -> TermSource {
        self.source
    }

    fn lookup(&self, term: SolarTerm, year: i32) -> Option<DateTime<Utc>> {
        self.entries.get(&(year, term)).copied()
    }

    fn year_range(&self) -> Option<(i32, i32)> {
        self.years
    }
}

// Header is line 1; record `i` (0-based) sits on line `i + 2`.
fn line_of(record: usize) -> u64 {
    record as u64 + 2
}

const BUNDLED_PRECISE_CSV: &str = include_str!("../data/solar_terms_precise.csv");
const BUNDLED_COARSE_CSV: &str = include_str!("../data/solar_terms_coarse.csv");

static BUNDLED_PRECISE: OnceLock<Arc<TermTable>> = OnceLock::new();
static BUNDLED_COARSE: OnceLock<Arc<TermTable>> = OnceLock::new();

/// Bundled precise table, 1900-2100. Parsed once per process.
pub fn bundled_precise() -> Arc<TermTable> {
    BUNDLED_PRECISE
        .get_or_init(|| {
            Arc::new(
                TermTable::precise_from_csv_str(BUNDLED_PRECISE_CSV).unwrap_or_else(|e| {
                    tracing::error!(error = %e, "bundled precise solar-term data failed to parse");
                    TermTable::empty(TermSource::Precise)
                }),
            )
        })
        .clone()
}

/// Bundled coarse table, 1850-2100. Parsed once per process.
pub fn bundled_coarse() -> Arc<TermTable> {
    BUNDLED_COARSE
        .get_or_init(|| {
            Arc::new(
                TermTable::coarse_from_csv_str(BUNDLED_COARSE_CSV).unwrap_or_else(|e| {
                    tracing::error!(error = %e, "bundled coarse solar-term data failed to parse");
                    TermTable::empty(TermSource::Coarse)
                }),
            )
        })
        .clone()
}
