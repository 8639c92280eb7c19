//! Na-yin (納音) sound elements of the sixty pillars.
//!
//! Each consecutive yang/yin pair of the cycle (甲子乙丑, 丙寅丁卯, ...)
//! shares one na-yin, so the 60 keys resolve through 30 names. The element
//! is the last character of the name.

use serde::Serialize;

use crate::element::Element;
use crate::pillar::Pillar;

/// A na-yin label and its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Nayin {
    pub name: &'static str,
    pub element: Element,
}

const fn ny(name: &'static str, element: Element) -> Nayin {
    Nayin { name, element }
}

/// Indexed by `pillar.index() / 2`.
const NAYIN_TABLE: [Nayin; 30] = [
    ny("海中金", Element::Metal), // 甲子 乙丑
    ny("爐中火", Element::Fire),  // 丙寅 丁卯
    ny("大林木", Element::Wood),  // 戊辰 己巳
    ny("路旁土", Element::Earth), // 庚午 辛未
    ny("劍鋒金", Element::Metal), // 壬申 癸酉
    ny("山頭火", Element::Fire),  // 甲戌 乙亥
    ny("澗下水", Element::Water), // 丙子 丁丑
    ny("城頭土", Element::Earth), // 戊寅 己卯
    ny("白蠟金", Element::Metal), // 庚辰 辛巳
    ny("楊柳木", Element::Wood),  // 壬午 癸未
    ny("泉中水", Element::Water), // 甲申 乙酉
    ny("屋上土", Element::Earth), // 丙戌 丁亥
    ny("霹靂火", Element::Fire),  // 戊子 己丑
    ny("松柏木", Element::Wood),  // 庚寅 辛卯
    ny("長流水", Element::Water), // 壬辰 癸巳
    ny("沙中金", Element::Metal), // 甲午 乙未
    ny("山下火", Element::Fire),  // 丙申 丁酉
    ny("平地木", Element::Wood),  // 戊戌 己亥
    ny("壁上土", Element::Earth), // 庚子 辛丑
    ny("金箔金", Element::Metal), // 壬寅 癸卯
    ny("覆燈火", Element::Fire),  // 甲辰 乙巳
    ny("天河水", Element::Water), // 丙午 丁未
    ny("大驛土", Element::Earth), // 戊申 己酉
    ny("釵釧金", Element::Metal), // 庚戌 辛亥
    ny("桑柘木", Element::Wood),  // 壬子 癸丑
    ny("大溪水", Element::Water), // 甲寅 乙卯
    ny("沙中土", Element::Earth), // 丙辰 丁巳
    ny("天上火", Element::Fire),  // 戊午 己未
    ny("石榴木", Element::Wood),  // 庚申 辛酉
    ny("大海水", Element::Water), // 壬戌 癸亥
];

/// Na-yin of a pillar.
pub const fn nayin(pillar: Pillar) -> Nayin {
    NAYIN_TABLE[(pillar.index() / 2) as usize]
}

/// Na-yin by two-character key such as `"戊寅"`. `None` for an invalid key.
pub fn nayin_by_key(key: &str) -> Option<Nayin> {
    Pillar::from_name(key).map(nayin)
}
