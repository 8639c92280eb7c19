//! Engine facade and the process-wide bundled engine.

use std::sync::{Arc, OnceLock};

use sizhu_base::{hidden_stems, nayin};
use sizhu_config::EngineConfig;
use sizhu_terms::{SolarTermResolver, TermProvider, TermTable, bundled_coarse, bundled_precise};
use sizhu_time::correct;

use crate::calculator::PillarCalculator;
use crate::error::ChartError;
use crate::input::{BirthInput, RawBirthInput};
use crate::interactions::detect;
use crate::result::{BoundaryReport, CalculationResult};
use crate::trace::{TraceStage, Tracer};
use crate::validate::{ValidationErrors, Validator};
use crate::wuxing::score;
use crate::yinyang::yin_yang_ratio;

/// Chart calculator over a solar-term chain.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    resolver: SolarTermResolver,
    validator: Validator,
    trace: bool,
}

impl Engine {
    /// Engine over `resolver` with default validation and tracing off.
    pub fn new(resolver: SolarTermResolver) -> Self {
        Self {
            resolver,
            validator: Validator::default(),
            trace: false,
        }
    }

    /// Bundled precise and coarse datasets.
    pub fn bundled() -> Self {
        Self::new(SolarTermResolver::bundled())
    }

    /// Build the provider chain and settings described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let data = &config.data;
        let mut providers: Vec<Arc<dyn TermProvider>> = Vec::new();

        if let Some(path) = &data.precise_path {
            let table = TermTable::load_precise(path)?;
            tracing::info!(path = %path.display(), entries = table.len(), "loaded precise solar-term data");
            providers.push(Arc::new(table));
        } else if data.use_bundled {
            providers.push(bundled_precise());
        }
        if let Some(path) = &data.coarse_path {
            let table = TermTable::load_coarse(path)?;
            tracing::info!(path = %path.display(), entries = table.len(), "loaded coarse solar-term data");
            providers.push(Arc::new(table));
        } else if data.use_bundled {
            providers.push(bundled_coarse());
        }

        Ok(Self {
            resolver: SolarTermResolver::new(providers),
            validator: Validator::from(&config.validation),
            trace: config.calculation.trace,
        })
    }

    /// Attach the structured trace to every result.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn resolver(&self) -> &SolarTermResolver {
        &self.resolver
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    /// Validate a raw record and calculate.
    pub fn calculate_raw(&self, raw: &RawBirthInput) -> Result<CalculationResult, ValidationErrors> {
        let input = self.validator.validate(raw)?;
        Ok(self.calculate(&input))
    }

    /// Calculate a chart. Never fails: missing data degrades to heuristics.
    pub fn calculate(&self, input: &BirthInput) -> CalculationResult {
        let mut tracer = Tracer::new(self.trace);

        let correction = correct(input.local, input.tz_offset_minutes, input.solar_time);
        if input.solar_time.longitude_deg().is_some() {
            tracer.note(TraceStage::SolarTime, || {
                format!(
                    "{} correction {:+}s (lmt {:+}s, eot {:+}s): {} -> {}, day delta {}",
                    correction.mode.code(),
                    correction.offsets.total_seconds,
                    correction.offsets.lmt_seconds,
                    correction.offsets.eot_seconds,
                    correction.civil.format("%Y-%m-%d %H:%M:%S"),
                    correction.adjusted.format("%Y-%m-%d %H:%M:%S"),
                    correction.day_delta
                )
            });
        }

        let resolution =
            PillarCalculator::new(&self.resolver).resolve_traced(input, &correction, &mut tracer);
        let pillars = resolution.pillars;

        CalculationResult {
            input: *input,
            instant_utc: resolution.instant_utc,
            solar_time: correction,
            pillars,
            hidden_stems: pillars.map(|p| hidden_stems(p.branch()).to_vec()),
            nayin: pillars.map(|p| nayin(*p)),
            wuxing: score(&pillars),
            yin_yang: yin_yang_ratio(&pillars),
            interactions: detect(&pillars),
            boundaries: BoundaryReport {
                lichun: resolution.year.boundary,
                year_source: resolution.year.source,
                month_term: resolution.month.boundary,
                month_source: resolution.month.source,
                actual_year: resolution.year.actual_year,
                day_date: resolution.day.date,
                zi_advanced: resolution.day.zi_advanced,
            },
            trace: tracer.finish(),
        }
    }
}

static GLOBAL_ENGINE: OnceLock<Engine> = OnceLock::new();

/// Process-wide engine over the bundled datasets, built on first use.
pub fn global_engine() -> &'static Engine {
    GLOBAL_ENGINE.get_or_init(Engine::bundled)
}

/// Calculate with the process-wide bundled engine.
pub fn calculate(input: &BirthInput) -> CalculationResult {
    global_engine().calculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn trace_only_when_enabled() {
        let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540).unwrap();
        assert!(Engine::bundled().calculate(&input).trace.is_none());
        let traced = Engine::bundled().with_trace(true).calculate(&input);
        let events = traced.trace.unwrap();
        assert!(events.iter().any(|e| e.stage == TraceStage::Year));
        assert!(events.iter().all(|e| !e.fallback));
    }

    #[test]
    fn empty_chain_still_calculates() {
        let engine = Engine::new(SolarTermResolver::empty()).with_trace(true);
        let input = BirthInput::from_ymd_hms(1985, 10, 6, 19, 30, 0, 540).unwrap();
        let r = engine.calculate(&input);
        assert!(r.used_fallback());
        // The civil-month heuristic misses 寒露 on the 8th: 戌 instead of 酉.
        assert_eq!(r.pillars.to_string(), "乙丑 丙戌 戊寅 壬戌");
        let trace = r.trace.unwrap();
        assert!(trace.iter().filter(|e| e.fallback).count() >= 2);
    }

    #[test]
    fn global_engine_matches_bundled() {
        let input = BirthInput::from_ymd_hms(2000, 1, 1, 12, 0, 0, 540).unwrap();
        assert_eq!(calculate(&input), Engine::bundled().calculate(&input));
        assert!(std::ptr::eq(global_engine(), global_engine()));
    }
}
