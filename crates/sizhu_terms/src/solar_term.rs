//! The 24 solar terms (二十四節氣).
//!
//! Terms are ordered as they fall in a Gregorian year, 小寒 first. Even
//! indices are the sectional terms (節) that open a month pillar; odd
//! indices are the principal terms (中氣).

use serde::Serialize;
use sizhu_base::Branch;

/// One of the 24 solar terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SolarTerm {
    #[serde(rename = "小寒")]
    Xiaohan,
    #[serde(rename = "大寒")]
    Dahan,
    #[serde(rename = "立春")]
    Lichun,
    #[serde(rename = "雨水")]
    Yushui,
    #[serde(rename = "驚蟄")]
    Jingzhe,
    #[serde(rename = "春分")]
    Chunfen,
    #[serde(rename = "清明")]
    Qingming,
    #[serde(rename = "穀雨")]
    Guyu,
    #[serde(rename = "立夏")]
    Lixia,
    #[serde(rename = "小滿")]
    Xiaoman,
    #[serde(rename = "芒種")]
    Mangzhong,
    #[serde(rename = "夏至")]
    Xiazhi,
    #[serde(rename = "小暑")]
    Xiaoshu,
    #[serde(rename = "大暑")]
    Dashu,
    #[serde(rename = "立秋")]
    Liqiu,
    #[serde(rename = "處暑")]
    Chushu,
    #[serde(rename = "白露")]
    Bailu,
    #[serde(rename = "秋分")]
    Qiufen,
    #[serde(rename = "寒露")]
    Hanlu,
    #[serde(rename = "霜降")]
    Shuangjiang,
    #[serde(rename = "立冬")]
    Lidong,
    #[serde(rename = "小雪")]
    Xiaoxue,
    #[serde(rename = "大雪")]
    Daxue,
    #[serde(rename = "冬至")]
    Dongzhi,
}

/// All 24 terms in calendar order (0 = 小寒).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Xiaohan,
    SolarTerm::Dahan,
    SolarTerm::Lichun,
    SolarTerm::Yushui,
    SolarTerm::Jingzhe,
    SolarTerm::Chunfen,
    SolarTerm::Qingming,
    SolarTerm::Guyu,
    SolarTerm::Lixia,
    SolarTerm::Xiaoman,
    SolarTerm::Mangzhong,
    SolarTerm::Xiazhi,
    SolarTerm::Xiaoshu,
    SolarTerm::Dashu,
    SolarTerm::Liqiu,
    SolarTerm::Chushu,
    SolarTerm::Bailu,
    SolarTerm::Qiufen,
    SolarTerm::Hanlu,
    SolarTerm::Shuangjiang,
    SolarTerm::Lidong,
    SolarTerm::Xiaoxue,
    SolarTerm::Daxue,
    SolarTerm::Dongzhi,
];

/// The 12 sectional terms in calendar order; each opens one month branch.
pub const SECTIONAL_TERMS: [SolarTerm; 12] = [
    SolarTerm::Xiaohan,
    SolarTerm::Lichun,
    SolarTerm::Jingzhe,
    SolarTerm::Qingming,
    SolarTerm::Lixia,
    SolarTerm::Mangzhong,
    SolarTerm::Xiaoshu,
    SolarTerm::Liqiu,
    SolarTerm::Bailu,
    SolarTerm::Hanlu,
    SolarTerm::Lidong,
    SolarTerm::Daxue,
];

// (traditional, simplified, pinyin)
const NAMES: [(&str, &str, &str); 24] = [
    ("小寒", "小寒", "Xiaohan"),
    ("大寒", "大寒", "Dahan"),
    ("立春", "立春", "Lichun"),
    ("雨水", "雨水", "Yushui"),
    ("驚蟄", "惊蛰", "Jingzhe"),
    ("春分", "春分", "Chunfen"),
    ("清明", "清明", "Qingming"),
    ("穀雨", "谷雨", "Guyu"),
    ("立夏", "立夏", "Lixia"),
    ("小滿", "小满", "Xiaoman"),
    ("芒種", "芒种", "Mangzhong"),
    ("夏至", "夏至", "Xiazhi"),
    ("小暑", "小暑", "Xiaoshu"),
    ("大暑", "大暑", "Dashu"),
    ("立秋", "立秋", "Liqiu"),
    ("處暑", "处暑", "Chushu"),
    ("白露", "白露", "Bailu"),
    ("秋分", "秋分", "Qiufen"),
    ("寒露", "寒露", "Hanlu"),
    ("霜降", "霜降", "Shuangjiang"),
    ("立冬", "立冬", "Lidong"),
    ("小雪", "小雪", "Xiaoxue"),
    ("大雪", "大雪", "Daxue"),
    ("冬至", "冬至", "Dongzhi"),
];

impl SolarTerm {
    /// 0-based index in calendar order.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> SolarTerm {
        ALL_SOLAR_TERMS[(index % 24) as usize]
    }

    /// Traditional Chinese name.
    pub const fn name(self) -> &'static str {
        NAMES[self.index() as usize].0
    }

    /// Simplified Chinese name.
    pub const fn simplified_name(self) -> &'static str {
        NAMES[self.index() as usize].1
    }

    pub const fn pinyin(self) -> &'static str {
        NAMES[self.index() as usize].2
    }

    /// Apparent solar ecliptic longitude at the term, degrees.
    ///
    /// 小寒 = 285°, advancing 15° per term; 春分 = 0°.
    pub const fn longitude_deg(self) -> u16 {
        (285 + 15 * self.index() as u16) % 360
    }

    /// Whether the term is sectional (節), i.e. opens a month.
    pub const fn is_sectional(self) -> bool {
        self.index() % 2 == 0
    }

    /// Month branch opened by a sectional term; `None` for principal terms.
    ///
    /// 立春 opens 寅, 驚蟄 卯, ... 大雪 子, 小寒 丑.
    pub const fn month_branch(self) -> Option<Branch> {
        if self.is_sectional() {
            Some(Branch::from_index(self.index() / 2 + 1))
        } else {
            None
        }
    }

    /// Civil month (1..=12) the term normally falls in.
    pub const fn typical_month(self) -> u32 {
        (self.index() / 2 + 1) as u32
    }

    /// Parse a name: traditional, simplified or pinyin (case-insensitive).
    pub fn from_name(name: &str) -> Option<SolarTerm> {
        let name = name.trim();
        NAMES
            .iter()
            .position(|(trad, simp, pinyin)| {
                *trad == name || *simp == name || pinyin.eq_ignore_ascii_case(name)
            })
            .map(|i| ALL_SOLAR_TERMS[i])
    }
}

impl std::fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
