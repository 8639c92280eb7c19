//! Stem and branch relation tables.
//!
//! Pairwise tests are symmetric: `f(a, b) == f(b, a)`. Triads are listed in
//! their traditional order with the cardinal branch (子午卯酉) in the middle.

use serde::Serialize;

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// 六沖: branches six apart.
pub const fn branches_clash(a: Branch, b: Branch) -> bool {
    (a.index() + 12 - b.index()) % 12 == 6
}

/// 六合: pairs whose indices sum to 1 (mod 12), with the element they form.
pub const fn six_combination(a: Branch, b: Branch) -> Option<Element> {
    if (a.index() + b.index()) % 12 != 1 {
        return None;
    }
    let low = if a.index() < b.index() { a } else { b };
    Some(match low {
        Branch::Zi => Element::Earth,  // 子丑
        Branch::Yin => Element::Wood,  // 寅亥
        Branch::Mao => Element::Fire,  // 卯戌
        Branch::Chen => Element::Metal, // 辰酉
        Branch::Si => Element::Water,  // 巳申
        _ => Element::Fire,            // 午未
    })
}

/// 六害: pairs whose indices sum to 7 (mod 12).
pub const fn branches_harm(a: Branch, b: Branch) -> bool {
    (a.index() + b.index()) % 12 == 7
}

const DESTRUCTIONS: [(Branch, Branch); 6] = [
    (Branch::Zi, Branch::You),
    (Branch::Chou, Branch::Chen),
    (Branch::Yin, Branch::Hai),
    (Branch::Mao, Branch::Wu),
    (Branch::Si, Branch::Shen),
    (Branch::Wei, Branch::Xu),
];

/// 六破.
pub fn branches_destroy(a: Branch, b: Branch) -> bool {
    DESTRUCTIONS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Flavour of a punishment (刑).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PunishmentKind {
    /// 無恩之刑: 寅巳申.
    #[serde(rename = "無恩")]
    Ungrateful,
    /// 恃勢之刑: 丑戌未.
    #[serde(rename = "恃勢")]
    Bullying,
    /// 無禮之刑: 子卯.
    #[serde(rename = "無禮")]
    Rude,
    /// 自刑: 辰辰, 午午, 酉酉, 亥亥.
    #[serde(rename = "自刑")]
    SelfPunishment,
}

impl PunishmentKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ungrateful => "無恩",
            Self::Bullying => "恃勢",
            Self::Rude => "無禮",
            Self::SelfPunishment => "自刑",
        }
    }
}

/// Members of the two three-way punishments.
pub const PUNISHMENT_TRIADS: [([Branch; 3], PunishmentKind); 2] = [
    ([Branch::Yin, Branch::Si, Branch::Shen], PunishmentKind::Ungrateful),
    ([Branch::Chou, Branch::Xu, Branch::Wei], PunishmentKind::Bullying),
];

/// Branches that punish themselves when doubled.
pub const SELF_PUNISHING: [Branch; 4] = [Branch::Chen, Branch::Wu, Branch::You, Branch::Hai];

/// Punishment between two branches, if any.
///
/// Any two distinct members of a punishment triad punish each other; a
/// self-punishing branch needs to appear twice.
pub fn punishment(a: Branch, b: Branch) -> Option<PunishmentKind> {
    if a == b {
        return SELF_PUNISHING
            .contains(&a)
            .then_some(PunishmentKind::SelfPunishment);
    }
    if matches!(
        (a, b),
        (Branch::Zi, Branch::Mao) | (Branch::Mao, Branch::Zi)
    ) {
        return Some(PunishmentKind::Rude);
    }
    PUNISHMENT_TRIADS
        .iter()
        .find(|(members, _)| members.contains(&a) && members.contains(&b))
        .map(|&(_, kind)| kind)
}

/// Three branches that together form an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BranchTriad {
    pub branches: [Branch; 3],
    pub element: Element,
}

impl BranchTriad {
    /// The cardinal (middle) branch.
    pub const fn center(&self) -> Branch {
        self.branches[1]
    }

    pub fn contains(&self, b: Branch) -> bool {
        self.branches.contains(&b)
    }
}

/// 三合 frames: birth, peak and storage of an element.
pub const TRIPLE_HARMONIES: [BranchTriad; 4] = [
    BranchTriad {
        branches: [Branch::Shen, Branch::Zi, Branch::Chen],
        element: Element::Water,
    },
    BranchTriad {
        branches: [Branch::Hai, Branch::Mao, Branch::Wei],
        element: Element::Wood,
    },
    BranchTriad {
        branches: [Branch::Yin, Branch::Wu, Branch::Xu],
        element: Element::Fire,
    },
    BranchTriad {
        branches: [Branch::Si, Branch::You, Branch::Chou],
        element: Element::Metal,
    },
];

/// 三會 seasonal directions.
pub const DIRECTIONAL_TRIADS: [BranchTriad; 4] = [
    BranchTriad {
        branches: [Branch::Yin, Branch::Mao, Branch::Chen],
        element: Element::Wood,
    },
    BranchTriad {
        branches: [Branch::Si, Branch::Wu, Branch::Wei],
        element: Element::Fire,
    },
    BranchTriad {
        branches: [Branch::Shen, Branch::You, Branch::Xu],
        element: Element::Metal,
    },
    BranchTriad {
        branches: [Branch::Hai, Branch::Zi, Branch::Chou],
        element: Element::Water,
    },
];

/// 半合: two distinct members of a triple harmony, one of them the center.
pub fn half_harmony(a: Branch, b: Branch) -> Option<Element> {
    if a == b {
        return None;
    }
    TRIPLE_HARMONIES
        .iter()
        .find(|t| t.contains(a) && t.contains(b) && (t.center() == a || t.center() == b))
        .map(|t| t.element)
}

/// 天干五合: stems five apart, with the element they transform into.
pub const fn stem_combination(a: Stem, b: Stem) -> Option<Element> {
    if (a.index() + 5) % 10 != b.index() && (b.index() + 5) % 10 != a.index() {
        return None;
    }
    Some(match a.index() % 5 {
        0 => Element::Earth, // 甲己
        1 => Element::Metal, // 乙庚
        2 => Element::Water, // 丙辛
        3 => Element::Wood,  // 丁壬
        _ => Element::Fire,  // 戊癸
    })
}

/// 天干沖: 甲庚, 乙辛, 丙壬, 丁癸. 戊 and 己 have no clash partner.
pub const fn stems_clash(a: Stem, b: Stem) -> bool {
    a.index().abs_diff(b.index()) == 6
}
