//! Hidden stems (地支藏干) of each branch.
//!
//! Every branch stores one to three stems: the primary qi (本氣), and for
//! mixed branches a middle qi (中氣) and residual qi (餘氣). Weights are the
//! score each entry contributes to the five-element tally:
//!
//! | entries | 本氣 | 中氣 | 餘氣 |
//! |---|---|---|---|
//! | 1 | 1.0 | - | - |
//! | 2 | 0.7 | 0.3 | - |
//! | 3 | 0.6 | 0.3 | 0.1 |
//!
//! Index 0 is always the primary qi.

use serde::Serialize;

use crate::branch::Branch;
use crate::stem::Stem;

/// Role of a hidden stem within its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QiKind {
    #[serde(rename = "本氣")]
    Primary,
    #[serde(rename = "中氣")]
    Middle,
    #[serde(rename = "餘氣")]
    Residual,
}

impl QiKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "本氣",
            Self::Middle => "中氣",
            Self::Residual => "餘氣",
        }
    }
}

/// One hidden-stem entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HiddenStem {
    pub stem: Stem,
    /// Score contribution in the five-element tally.
    pub weight: f64,
    /// Percentage share of the branch's qi; `None` for single-stem branches.
    pub ratio: Option<u8>,
    #[serde(rename = "type")]
    pub kind: QiKind,
}

const fn only(stem: Stem) -> HiddenStem {
    HiddenStem {
        stem,
        weight: 1.0,
        ratio: None,
        kind: QiKind::Primary,
    }
}

const fn entry(stem: Stem, weight: f64, ratio: u8, kind: QiKind) -> HiddenStem {
    HiddenStem {
        stem,
        weight,
        ratio: Some(ratio),
        kind,
    }
}

const ZI: [HiddenStem; 1] = [only(Stem::Gui)];
const CHOU: [HiddenStem; 3] = [
    entry(Stem::Ji, 0.6, 60, QiKind::Primary),
    entry(Stem::Gui, 0.3, 30, QiKind::Middle),
    entry(Stem::Xin, 0.1, 10, QiKind::Residual),
];
const YIN: [HiddenStem; 3] = [
    entry(Stem::Jia, 0.6, 60, QiKind::Primary),
    entry(Stem::Bing, 0.3, 30, QiKind::Middle),
    entry(Stem::Wu, 0.1, 10, QiKind::Residual),
];
const MAO: [HiddenStem; 1] = [only(Stem::Yi)];
const CHEN: [HiddenStem; 3] = [
    entry(Stem::Wu, 0.6, 60, QiKind::Primary),
    entry(Stem::Yi, 0.3, 30, QiKind::Middle),
    entry(Stem::Gui, 0.1, 10, QiKind::Residual),
];
const SI: [HiddenStem; 3] = [
    entry(Stem::Bing, 0.6, 60, QiKind::Primary),
    entry(Stem::Geng, 0.3, 30, QiKind::Middle),
    entry(Stem::Wu, 0.1, 10, QiKind::Residual),
];
const WU: [HiddenStem; 2] = [
    entry(Stem::Ding, 0.7, 70, QiKind::Primary),
    entry(Stem::Ji, 0.3, 30, QiKind::Middle),
];
const WEI: [HiddenStem; 3] = [
    entry(Stem::Ji, 0.6, 60, QiKind::Primary),
    entry(Stem::Ding, 0.3, 30, QiKind::Middle),
    entry(Stem::Yi, 0.1, 10, QiKind::Residual),
];
const SHEN: [HiddenStem; 3] = [
    entry(Stem::Geng, 0.6, 60, QiKind::Primary),
    entry(Stem::Ren, 0.3, 30, QiKind::Middle),
    entry(Stem::Wu, 0.1, 10, QiKind::Residual),
];
const YOU: [HiddenStem; 1] = [only(Stem::Xin)];
const XU: [HiddenStem; 3] = [
    entry(Stem::Wu, 0.6, 60, QiKind::Primary),
    entry(Stem::Xin, 0.3, 30, QiKind::Middle),
    entry(Stem::Ding, 0.1, 10, QiKind::Residual),
];
const HAI: [HiddenStem; 2] = [
    entry(Stem::Ren, 0.7, 70, QiKind::Primary),
    entry(Stem::Jia, 0.3, 30, QiKind::Middle),
];

/// Hidden stems of a branch, primary qi first.
pub fn hidden_stems(branch: Branch) -> &'static [HiddenStem] {
    match branch {
        Branch::Zi => &ZI,
        Branch::Chou => &CHOU,
        Branch::Yin => &YIN,
        Branch::Mao => &MAO,
        Branch::Chen => &CHEN,
        Branch::Si => &SI,
        Branch::Wu => &WU,
        Branch::Wei => &WEI,
        Branch::Shen => &SHEN,
        Branch::You => &YOU,
        Branch::Xu => &XU,
        Branch::Hai => &HAI,
    }
}

/// The primary (本氣) hidden stem of a branch.
pub fn primary_qi(branch: Branch) -> HiddenStem {
    hidden_stems(branch)[0]
}
