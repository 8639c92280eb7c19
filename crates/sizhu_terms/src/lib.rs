//! Solar-term boundaries for pillar calculation.
//!
//! This crate provides:
//! - The 24 solar terms and the 12 sectional terms that open month branches
//! - Tabular dataset providers (precise per-second, coarse date-only)
//! - Bundled datasets: precise 1900-2100, coarse 1850-2100
//! - A prioritised provider chain with nearest-occurrence and
//!   latest-boundary searches
//!
//! Lookups never fail: a miss is `None`, and the caller chooses the fallback.

pub mod error;
pub mod provider;
pub mod resolver;
pub mod solar_term;

pub use error::TermDataError;
pub use provider::{TermProvider, TermSource, TermTable, bundled_coarse, bundled_precise};
pub use resolver::{SolarTermRecord, SolarTermResolver};
pub use solar_term::{ALL_SOLAR_TERMS, SECTIONAL_TERMS, SolarTerm};
