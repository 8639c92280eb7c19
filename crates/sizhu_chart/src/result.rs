//! The calculation result record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sizhu_base::{HiddenStem, Nayin};
use sizhu_terms::{SolarTermRecord, TermSource};
use sizhu_time::SolarTimeCorrection;

use crate::input::BirthInput;
use crate::interactions::Interaction;
use crate::pillars::{FourPillars, PerPillar};
use crate::trace::TraceEvent;
use crate::wuxing::WuxingBreakdown;
use crate::yinyang::YinYangRatio;

/// Which boundaries decided the year and month pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundaryReport {
    /// 立春 the instant was compared against.
    pub lichun: Option<SolarTermRecord>,
    pub year_source: TermSource,
    /// Sectional term opening the month.
    pub month_term: Option<SolarTermRecord>,
    pub month_source: TermSource,
    /// Year after the 立春 adjustment.
    pub actual_year: i32,
    /// Calendar date the day pillar was computed from.
    pub day_date: NaiveDate,
    /// Whether the EARLY zi-hour rule advanced the day.
    pub zi_advanced: bool,
}

/// Full output of one chart calculation. Plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub input: BirthInput,
    /// UTC instant of the civil reading.
    pub instant_utc: DateTime<Utc>,
    pub solar_time: SolarTimeCorrection,
    pub pillars: FourPillars,
    pub hidden_stems: PerPillar<Vec<HiddenStem>>,
    pub nayin: PerPillar<Nayin>,
    pub wuxing: WuxingBreakdown,
    pub yin_yang: YinYangRatio,
    pub interactions: Vec<Interaction>,
    pub boundaries: BoundaryReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEvent>>,
}

impl CalculationResult {
    /// Whether any boundary came from a fallback tier.
    pub fn used_fallback(&self) -> bool {
        self.boundaries.year_source != TermSource::Precise
            || self.boundaries.month_source != TermSource::Precise
    }
}
