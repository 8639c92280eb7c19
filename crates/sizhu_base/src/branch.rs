//! The twelve earthly branches (地支).

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};

/// The twelve earthly branches, 子 through 亥.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

/// All 12 branches in cycle order (0 = 子).
pub const DIZHI: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Chinese character.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// Pinyin romanisation.
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Zi => "zi",
            Self::Chou => "chou",
            Self::Yin => "yin",
            Self::Mao => "mao",
            Self::Chen => "chen",
            Self::Si => "si",
            Self::Wu => "wu",
            Self::Wei => "wei",
            Self::Shen => "shen",
            Self::You => "you",
            Self::Xu => "xu",
            Self::Hai => "hai",
        }
    }

    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Branch at a cycle position; wraps modulo 12.
    pub const fn from_index(index: u8) -> Branch {
        DIZHI[(index % 12) as usize]
    }

    /// Element of the branch itself (not its hidden stems).
    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Chen | Self::Xu | Self::Chou | Self::Wei => Element::Earth,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
        }
    }

    /// Polarity: 子寅辰午申戌 are yang.
    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// Branch that rules a clock hour (0..=23).
    ///
    /// Two-hour windows centred on the odd hours; 23:00-00:59 is 子.
    pub const fn from_hour(hour: u32) -> Branch {
        DIZHI[(((hour + 1) / 2) % 12) as usize]
    }

    /// Parse from the Chinese character.
    pub fn from_char(c: char) -> Option<Branch> {
        DIZHI.into_iter().find(|b| b.name().starts_with(c))
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
