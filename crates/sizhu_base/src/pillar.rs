//! Sexagenary pillars and the Five Tigers / Five Rats derivation tables.
//!
//! A pillar is one of the 60 stem-branch pairs. Index `i` in `[0, 60)` maps
//! to `TIANGAN[i % 10]` and `DIZHI[i % 12]`; the stem and branch are never
//! chosen independently, so only same-parity pairs exist.
//!
//! Month stems follow 五虎遁 (year stem picks the stem of the 寅 month) and
//! hour stems follow 五鼠遁 (day stem picks the stem of the 子 hour).

use serde::Serialize;

use crate::branch::{Branch, DIZHI};
use crate::stem::{Stem, TIANGAN};

/// Number of pillars in the sexagenary cycle.
pub const CYCLE_LEN: u8 = 60;

/// A 甲子 year used as the year-cycle anchor.
pub const JIAZI_YEAR: i32 = 1984;

/// One stem-branch pair of the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// 甲子, index 0.
    pub const JIAZI: Pillar = Pillar {
        stem: Stem::Jia,
        branch: Branch::Zi,
    };

    /// Pillar at a cycle index; wraps modulo 60.
    pub const fn from_index(index: u8) -> Pillar {
        let i = index % CYCLE_LEN;
        Pillar {
            stem: TIANGAN[(i % 10) as usize],
            branch: DIZHI[(i % 12) as usize],
        }
    }

    /// Pillar at a signed offset from 甲子 (e.g. days since a 甲子 day).
    pub const fn from_offset(offset: i64) -> Pillar {
        Self::from_index(offset.rem_euclid(CYCLE_LEN as i64) as u8)
    }

    /// Pair a stem with a branch. `None` when their parities differ.
    pub const fn from_parts(stem: Stem, branch: Branch) -> Option<Pillar> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Pillar { stem, branch })
        } else {
            None
        }
    }

    /// Parse a two-character name such as `"甲子"`.
    pub fn from_name(name: &str) -> Option<Pillar> {
        let mut chars = name.chars();
        let stem = Stem::from_char(chars.next()?)?;
        let branch = Branch::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_parts(stem, branch)
    }

    /// Cycle index (甲子=0 .. 癸亥=59), recovered from the pair.
    ///
    /// `i ≡ s (mod 10)` and `i ≡ b (mod 12)` solve to `i = 6s - 5b (mod 60)`.
    pub const fn index(self) -> u8 {
        let s = self.stem.index() as i16;
        let b = self.branch.index() as i16;
        (6 * s - 5 * b).rem_euclid(CYCLE_LEN as i16) as u8
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Two-character name, e.g. `"乙丑"`.
    pub fn name(self) -> String {
        format!("{}{}", self.stem.name(), self.branch.name())
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.name(), self.branch.name())
    }
}

/// Year pillar for a year already adjusted to the Lichun boundary.
pub const fn year_pillar(actual_year: i32) -> Pillar {
    Pillar::from_offset(actual_year as i64 - JIAZI_YEAR as i64)
}

const fn build_five_tigers() -> [[Stem; 12]; 10] {
    let mut table = [[Stem::Jia; 12]; 10];
    let mut s = 0;
    while s < 10 {
        // 甲己 -> 丙寅, 乙庚 -> 戊寅, 丙辛 -> 庚寅, 丁壬 -> 壬寅, 戊癸 -> 甲寅
        let yin_month_stem = (s % 5) * 2 + 2;
        let mut b = 0;
        while b < 12 {
            let months_after_yin = (b + 10) % 12;
            table[s][b] = Stem::from_index(((yin_month_stem + months_after_yin) % 10) as u8);
            b += 1;
        }
        s += 1;
    }
    table
}

const fn build_five_rats() -> [[Stem; 12]; 10] {
    let mut table = [[Stem::Jia; 12]; 10];
    let mut s = 0;
    while s < 10 {
        // 甲己 -> 甲子, 乙庚 -> 丙子, 丙辛 -> 戊子, 丁壬 -> 庚子, 戊癸 -> 壬子
        let zi_hour_stem = (s % 5) * 2;
        let mut b = 0;
        while b < 12 {
            table[s][b] = Stem::from_index(((zi_hour_stem + b) % 10) as u8);
            b += 1;
        }
        s += 1;
    }
    table
}

/// 五虎遁: `FIVE_TIGERS[year_stem][month_branch]` is the month stem.
pub const FIVE_TIGERS: [[Stem; 12]; 10] = build_five_tigers();

/// 五鼠遁: `FIVE_RATS[day_stem][hour_branch]` is the hour stem.
pub const FIVE_RATS: [[Stem; 12]; 10] = build_five_rats();

/// Month pillar from the year stem and the month branch.
pub const fn month_pillar(year_stem: Stem, month_branch: Branch) -> Pillar {
    Pillar {
        stem: FIVE_TIGERS[year_stem.index() as usize][month_branch.index() as usize],
        branch: month_branch,
    }
}

/// Hour pillar from the day stem and the hour branch.
pub const fn hour_pillar(day_stem: Stem, hour_branch: Branch) -> Pillar {
    Pillar {
        stem: FIVE_RATS[day_stem.index() as usize][hour_branch.index() as usize],
        branch: hour_branch,
    }
}
