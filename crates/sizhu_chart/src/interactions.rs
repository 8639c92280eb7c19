//! Stem and branch interaction detection.
//!
//! Discovery only: the detector reads the four pillars and reports what it
//! finds. It never feeds back into scoring.
//!
//! Pairs are checked in chart order (year-month, year-day, ... day-hour),
//! then three-branch frames. A complete 三合 suppresses its 半合 pairs, and a
//! complete 寅巳申 / 丑戌未 punishment is reported once instead of pairwise.

use serde::Serialize;
use sizhu_base::{
    Branch, BranchTriad, DIRECTIONAL_TRIADS, Element, PUNISHMENT_TRIADS, PunishmentKind,
    TRIPLE_HARMONIES, branches_clash, branches_destroy, branches_harm, half_harmony, punishment,
    six_combination, stem_combination, stems_clash,
};

use crate::pillars::{ALL_POSITIONS, FourPillars, PillarPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// 六沖
    Clash,
    /// 六合
    Combination,
    /// 三合
    TripleHarmony,
    /// 半合
    HalfHarmony,
    /// 三會
    DirectionalTriad,
    /// 六害
    Harm,
    /// 刑
    Punishment,
    /// 六破
    Destruction,
    /// 天干五合
    StemCombination,
    /// 天干沖
    StemClash,
}

impl InteractionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clash => "六沖",
            Self::Combination => "六合",
            Self::TripleHarmony => "三合",
            Self::HalfHarmony => "半合",
            Self::DirectionalTriad => "三會",
            Self::Harm => "六害",
            Self::Punishment => "刑",
            Self::Destruction => "六破",
            Self::StemCombination => "天干五合",
            Self::StemClash => "天干沖",
        }
    }
}

/// One detected interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    /// Pillars involved, in chart order.
    pub participants: Vec<PillarPosition>,
    /// The symbols involved, e.g. `"子午"`.
    pub evidence: String,
    /// Element formed, for combinations and frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punishment: Option<PunishmentKind>,
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.evidence)?;
        if let Some(e) = self.element {
            write!(f, " -> {}", e.name())?;
        }
        if let Some(p) = self.punishment {
            write!(f, " ({})", p.name())?;
        }
        let names: Vec<&str> = self.participants.iter().map(|p| p.name()).collect();
        write!(f, " [{}]", names.join(", "))
    }
}

fn pair(
    kind: InteractionKind,
    a: PillarPosition,
    b: PillarPosition,
    evidence: String,
    element: Option<Element>,
) -> Interaction {
    Interaction {
        kind,
        participants: vec![a, b],
        evidence,
        element,
        punishment: None,
    }
}

/// Triads whose three branches all appear in the chart, with participants.
fn complete_frames(
    branches: &[(PillarPosition, Branch); 4],
    table: &[BranchTriad],
) -> Vec<(BranchTriad, Vec<PillarPosition>)> {
    table
        .iter()
        .filter(|t| t.branches.iter().all(|b| branches.iter().any(|(_, x)| x == b)))
        .map(|t| {
            let who = branches
                .iter()
                .filter(|(_, x)| t.contains(*x))
                .map(|(p, _)| *p)
                .collect();
            (*t, who)
        })
        .collect()
}

fn triad_evidence(branches: [Branch; 3]) -> String {
    branches.iter().map(|b| b.name()).collect()
}

/// Detect every interaction in a chart.
pub fn detect(pillars: &FourPillars) -> Vec<Interaction> {
    let stems = pillars.stems();
    let branches = pillars.branches();
    let bs: [(PillarPosition, Branch); 4] = ALL_POSITIONS.map(|p| (p, *branches.get(p)));

    let harmonies = complete_frames(&bs, &TRIPLE_HARMONIES);
    let directions = complete_frames(&bs, &DIRECTIONAL_TRIADS);
    let punishment_triads: Vec<([Branch; 3], Vec<PillarPosition>, PunishmentKind)> =
        PUNISHMENT_TRIADS
            .iter()
            .filter(|(members, _)| members.iter().all(|m| bs.iter().any(|(_, x)| x == m)))
            .map(|&(members, kind)| {
                let who = bs
                    .iter()
                    .filter(|(_, x)| members.contains(x))
                    .map(|(p, _)| *p)
                    .collect();
                (members, who, kind)
            })
            .collect();

    let mut found = Vec::new();

    for (i, &a) in ALL_POSITIONS.iter().enumerate() {
        for &b in &ALL_POSITIONS[i + 1..] {
            let (ba, bb) = (*branches.get(a), *branches.get(b));
            let (sa, sb) = (*stems.get(a), *stems.get(b));
            let branch_pair = format!("{ba}{bb}");
            let stem_pair = format!("{sa}{sb}");

            if branches_clash(ba, bb) {
                found.push(pair(InteractionKind::Clash, a, b, branch_pair.clone(), None));
            }
            if let Some(e) = six_combination(ba, bb) {
                found.push(pair(InteractionKind::Combination, a, b, branch_pair.clone(), Some(e)));
            }
            if let Some(e) = half_harmony(ba, bb) {
                let covered = harmonies.iter().any(|(t, _)| t.contains(ba) && t.contains(bb));
                if !covered {
                    found.push(pair(InteractionKind::HalfHarmony, a, b, branch_pair.clone(), Some(e)));
                }
            }
            if branches_harm(ba, bb) {
                found.push(pair(InteractionKind::Harm, a, b, branch_pair.clone(), None));
            }
            if let Some(kind) = punishment(ba, bb) {
                let covered = punishment_triads
                    .iter()
                    .any(|(members, _, k)| *k == kind && members.contains(&ba) && members.contains(&bb));
                if !covered {
                    let mut hit = pair(InteractionKind::Punishment, a, b, branch_pair.clone(), None);
                    hit.punishment = Some(kind);
                    found.push(hit);
                }
            }
            if branches_destroy(ba, bb) {
                found.push(pair(InteractionKind::Destruction, a, b, branch_pair, None));
            }
            if let Some(e) = stem_combination(sa, sb) {
                found.push(pair(InteractionKind::StemCombination, a, b, stem_pair.clone(), Some(e)));
            }
            if stems_clash(sa, sb) {
                found.push(pair(InteractionKind::StemClash, a, b, stem_pair, None));
            }
        }
    }

    for (t, who) in harmonies {
        found.push(Interaction {
            kind: InteractionKind::TripleHarmony,
            participants: who,
            evidence: triad_evidence(t.branches),
            element: Some(t.element),
            punishment: None,
        });
    }
    for (t, who) in directions {
        found.push(Interaction {
            kind: InteractionKind::DirectionalTriad,
            participants: who,
            evidence: triad_evidence(t.branches),
            element: Some(t.element),
            punishment: None,
        });
    }
    for (members, who, kind) in punishment_triads {
        found.push(Interaction {
            kind: InteractionKind::Punishment,
            participants: who,
            evidence: triad_evidence(members),
            element: None,
            punishment: Some(kind),
        });
    }

    found
}
