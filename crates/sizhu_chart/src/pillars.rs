//! The four pillar positions and per-position records.

use serde::Serialize;
use sizhu_base::{Branch, Pillar, Stem};

/// Year, month, day or hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

/// Positions in chart order.
pub const ALL_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// 年, 月, 日, 時.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "年",
            Self::Month => "月",
            Self::Day => "日",
            Self::Hour => "時",
        }
    }
}

impl std::fmt::Display for PillarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per pillar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PerPillar<T> {
    pub year: T,
    pub month: T,
    pub day: T,
    pub hour: T,
}

impl<T> PerPillar<T> {
    pub fn get(&self, pos: PillarPosition) -> &T {
        match pos {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    pub fn get_mut(&mut self, pos: PillarPosition) -> &mut T {
        match pos {
            PillarPosition::Year => &mut self.year,
            PillarPosition::Month => &mut self.month,
            PillarPosition::Day => &mut self.day,
            PillarPosition::Hour => &mut self.hour,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerPillar<U> {
        PerPillar {
            year: f(&self.year),
            month: f(&self.month),
            day: f(&self.day),
            hour: f(&self.hour),
        }
    }

    /// `(position, value)` pairs in chart order.
    pub fn iter(&self) -> impl Iterator<Item = (PillarPosition, &T)> {
        ALL_POSITIONS.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// The four pillars of a chart.
pub type FourPillars = PerPillar<Pillar>;

impl PerPillar<Pillar> {
    pub fn stems(&self) -> PerPillar<Stem> {
        self.map(|p| p.stem())
    }

    pub fn branches(&self) -> PerPillar<Branch> {
        self.map(|p| p.branch())
    }

    /// The day stem (日主).
    pub fn day_master(&self) -> Stem {
        self.day.stem()
    }

    /// Names in chart order, e.g. `["乙丑", "乙酉", "戊寅", "壬戌"]`.
    pub fn names(&self) -> [String; 4] {
        [
            self.year.name(),
            self.month.name(),
            self.day.name(),
            self.hour.name(),
        ]
    }
}

impl std::fmt::Display for PerPillar<Pillar> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}
