//! Opt-in structured record of how a chart was derived.
//!
//! Every event is also emitted as a `tracing` debug event; the collected list
//! is only kept when the caller asks for it. Recording never changes a result.

use serde::Serialize;

/// Calculation step an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStage {
    SolarTime,
    Year,
    Month,
    Day,
    Hour,
}

impl TraceStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SolarTime => "solar_time",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

/// One human-readable trace entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub stage: TraceStage,
    /// Whether a fallback (coarse data or heuristic) was taken.
    pub fallback: bool,
    pub message: String,
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.fallback { " (fallback)" } else { "" };
        write!(f, "[{}]{marker} {}", self.stage.name(), self.message)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tracer {
    enabled: bool,
    events: Vec<TraceEvent>,
}

impl Tracer {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    pub(crate) fn note(&mut self, stage: TraceStage, message: impl FnOnce() -> String) {
        self.push(stage, false, message);
    }

    pub(crate) fn fallback(&mut self, stage: TraceStage, message: impl FnOnce() -> String) {
        self.push(stage, true, message);
    }

    fn push(&mut self, stage: TraceStage, fallback: bool, message: impl FnOnce() -> String) {
        if !self.enabled && !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let message = message();
        tracing::debug!(stage = stage.name(), fallback, "{message}");
        if self.enabled {
            self.events.push(TraceEvent {
                stage,
                fallback,
                message,
            });
        }
    }

    pub(crate) fn finish(self) -> Option<Vec<TraceEvent>> {
        self.enabled.then_some(self.events)
    }
}
