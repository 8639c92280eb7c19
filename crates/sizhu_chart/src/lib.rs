//! Four-pillars (四柱) chart calculation.
//!
//! Takes a civil birth moment, corrects it to solar time, locates the year and
//! month boundaries on the solar-term chain, and derives the four pillars plus
//! hidden stems, na-yin, five-element scores, yin/yang balance and branch/stem
//! interactions.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sizhu_chart::*;
//!
//! let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540)
//!     .expect("valid date")
//!     .with_solar_time(SolarTimeMode::TrueSolar { longitude_deg: 126.98 });
//! let chart = calculate(&input);
//! println!("{}", chart.pillars);
//! ```

pub mod calculator;
pub mod engine;
pub mod error;
pub mod input;
pub mod interactions;
pub mod pillars;
pub mod result;
pub mod trace;
pub mod validate;
pub mod wuxing;
pub mod yinyang;

pub use calculator::{
    DAY_EPOCH_DAYS_FROM_CE, DayResolution, MonthResolution, PillarCalculator, PillarResolution,
    YearResolution, day_pillar_for_date, heuristic_month_branch, hour_pillar_for,
};
pub use engine::{Engine, calculate, global_engine};
pub use error::ChartError;
pub use input::{BirthInput, DayBoundaryMode, RawBirthInput, ZiHourMode};
pub use interactions::{Interaction, InteractionKind, detect};
pub use pillars::{ALL_POSITIONS, FourPillars, PerPillar, PillarPosition};
pub use result::{BoundaryReport, CalculationResult};
pub use trace::{TraceEvent, TraceStage};
pub use validate::{FieldError, ValidationErrors, Validator};
pub use wuxing::{
    BRANCH_WEIGHT, Contribution, ContributionSource, MONTH_COMMAND_MULTIPLIER, STEM_WEIGHT,
    WuxingBreakdown, WuxingScore, score, score_with_multiplier,
};
pub use yinyang::{YinYangRatio, yin_yang_ratio};

// Re-exported so callers need only this crate.
pub use sizhu_base::{Branch, Element, HiddenStem, Nayin, Pillar, Polarity, Stem};
pub use sizhu_config::EngineConfig;
pub use sizhu_terms::{SolarTerm, SolarTermRecord, SolarTermResolver, TermSource};
pub use sizhu_time::{SolarTimeCorrection, SolarTimeMode};
