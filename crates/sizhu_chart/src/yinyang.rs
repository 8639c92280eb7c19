//! Yin/yang balance over the eight chart symbols.

use serde::Serialize;
use sizhu_base::Polarity;

use crate::pillars::FourPillars;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YinYangRatio {
    pub yang_count: u8,
    pub yin_count: u8,
    /// Percentages; always sum to 100.
    pub yang_percent: f64,
    pub yin_percent: f64,
}

/// Count yang and yin across 4 stems and 4 branches.
pub fn yin_yang_ratio(pillars: &FourPillars) -> YinYangRatio {
    let yang_count = pillars
        .iter()
        .flat_map(|(_, p)| [p.stem().polarity(), p.branch().polarity()])
        .filter(|&pol| pol == Polarity::Yang)
        .count() as u8;
    let yin_count = 8 - yang_count;
    let yang_percent = f64::from(yang_count) * 100.0 / 8.0;
    YinYangRatio {
        yang_count,
        yin_count,
        yang_percent,
        yin_percent: 100.0 - yang_percent,
    }
}
