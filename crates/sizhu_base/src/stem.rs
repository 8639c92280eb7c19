//! The ten heavenly stems (天干).

use serde::{Deserialize, Serialize};

use crate::element::{ALL_ELEMENTS, Element, Polarity};

/// The ten heavenly stems, 甲 through 癸.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

/// All 10 stems in cycle order (0 = 甲).
pub const TIANGAN: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    /// Chinese character.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jia => "甲",
            Self::Yi => "乙",
            Self::Bing => "丙",
            Self::Ding => "丁",
            Self::Wu => "戊",
            Self::Ji => "己",
            Self::Geng => "庚",
            Self::Xin => "辛",
            Self::Ren => "壬",
            Self::Gui => "癸",
        }
    }

    /// Pinyin romanisation.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Jia => "jia",
            Self::Yi => "yi",
            Self::Bing => "bing",
            Self::Ding => "ding",
            Self::Wu => "wu",
            Self::Ji => "ji",
            Self::Geng => "geng",
            Self::Xin => "xin",
            Self::Ren => "ren",
            Self::Gui => "gui",
        }
    }

    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Jia => 0,
            Self::Yi => 1,
            Self::Bing => 2,
            Self::Ding => 3,
            Self::Wu => 4,
            Self::Ji => 5,
            Self::Geng => 6,
            Self::Xin => 7,
            Self::Ren => 8,
            Self::Gui => 9,
        }
    }

    /// Stem at a cycle position; wraps modulo 10.
    pub const fn from_index(index: u8) -> Stem {
        TIANGAN[(index % 10) as usize]
    }

    /// Element: consecutive pairs share one (甲乙 Wood .. 壬癸 Water).
    pub const fn element(self) -> Element {
        ALL_ELEMENTS[(self.index() / 2) as usize]
    }

    /// Polarity: 甲丙戊庚壬 are yang.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// Parse from the Chinese character.
    pub fn from_char(c: char) -> Option<Stem> {
        TIANGAN.into_iter().find(|s| s.name().starts_with(c))
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
