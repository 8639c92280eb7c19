//! Sexagenary symbols and the static tables every chart calculation reads.
//!
//! This crate provides:
//! - The ten stems, twelve branches, five elements and yin/yang polarity
//! - Sexagenary pillars with index recovery and the Five Tigers / Five Rats tables
//! - Hidden-stem (藏干) and na-yin (納音) tables
//! - Stem and branch relation tables (clash, combination, harm, punishment, ...)
//!
//! Everything here is `const` data or a pure function over it.

pub mod branch;
pub mod element;
pub mod hidden_stems;
pub mod nayin;
pub mod pillar;
pub mod relations;
pub mod stem;

pub use branch::{Branch, DIZHI};
pub use element::{ALL_ELEMENTS, Element, Polarity};
pub use hidden_stems::{HiddenStem, QiKind, hidden_stems, primary_qi};
pub use nayin::{Nayin, nayin, nayin_by_key};
pub use pillar::{
    CYCLE_LEN, FIVE_RATS, FIVE_TIGERS, JIAZI_YEAR, Pillar, hour_pillar, month_pillar, year_pillar,
};
pub use relations::{
    BranchTriad, DIRECTIONAL_TRIADS, PUNISHMENT_TRIADS, PunishmentKind, SELF_PUNISHING,
    TRIPLE_HARMONIES, branches_clash, branches_destroy, branches_harm, half_harmony, punishment,
    six_combination, stem_combination, stems_clash,
};
pub use stem::{Stem, TIANGAN};
