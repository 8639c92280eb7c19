//! Five-element (五行) scoring.
//!
//! Per pillar: the stem adds 1.0 to its element, the branch 0.8, and every
//! hidden stem its table weight. The month branch's primary hidden stem is
//! multiplied by the month-command factor (月令, 1.5).

use serde::Serialize;
use sizhu_base::{ALL_ELEMENTS, Element, QiKind, hidden_stems};

use crate::pillars::{FourPillars, PerPillar, PillarPosition};

pub const STEM_WEIGHT: f64 = 1.0;
pub const BRANCH_WEIGHT: f64 = 0.8;
pub const MONTH_COMMAND_MULTIPLIER: f64 = 1.5;

/// Five non-negative element buckets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WuxingScore {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl WuxingScore {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    /// Add a non-negative amount; anything else is ignored.
    pub fn add(&mut self, element: Element, amount: f64) {
        if !(amount.is_finite() && amount >= 0.0) {
            return;
        }
        let slot = match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        };
        *slot += amount;
    }

    pub fn total(&self) -> f64 {
        ALL_ELEMENTS.iter().map(|&e| self.get(e)).sum()
    }

    /// `(element, score)` in generating order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        ALL_ELEMENTS.into_iter().map(|e| (e, self.get(e)))
    }

    /// Highest-scoring element; ties go to the earlier one in generating order.
    pub fn dominant(&self) -> Element {
        self.iter()
            .fold((Element::Wood, f64::MIN), |best, (e, v)| {
                if v > best.1 { (e, v) } else { best }
            })
            .0
    }

    /// Elements with a zero score.
    pub fn missing(&self) -> Vec<Element> {
        self.iter().filter(|&(_, v)| v == 0.0).map(|(e, _)| e).collect()
    }
}

impl std::ops::AddAssign for WuxingScore {
    fn add_assign(&mut self, rhs: Self) {
        for (e, v) in rhs.iter() {
            self.add(e, v);
        }
    }
}

/// What produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    Stem,
    Branch,
    HiddenStem,
}

/// One line of the score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub position: PillarPosition,
    pub source: ContributionSource,
    /// The stem or branch character.
    pub symbol: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<QiKind>,
    pub element: Element,
    pub amount: f64,
    /// Whether the month-command multiplier was applied.
    pub month_command: bool,
}

/// Totals plus how they were reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WuxingBreakdown {
    pub totals: WuxingScore,
    pub per_pillar: PerPillar<WuxingScore>,
    pub contributions: Vec<Contribution>,
}

/// Score a chart with the standard month-command multiplier.
pub fn score(pillars: &FourPillars) -> WuxingBreakdown {
    score_with_multiplier(pillars, MONTH_COMMAND_MULTIPLIER)
}

/// Score a chart with an explicit month-command multiplier (1.0 disables it).
pub fn score_with_multiplier(pillars: &FourPillars, month_command: f64) -> WuxingBreakdown {
    let mut contributions = Vec::with_capacity(4 * 5);
    let mut per_pillar = PerPillar::<WuxingScore>::default();

    for (position, pillar) in pillars.iter() {
        let stem = pillar.stem();
        let branch = pillar.branch();
        let mut push = |source, symbol, qi, element, amount, boosted| {
            per_pillar.get_mut(position).add(element, amount);
            contributions.push(Contribution {
                position,
                source,
                symbol,
                qi,
                element,
                amount,
                month_command: boosted,
            });
        };

        push(
            ContributionSource::Stem,
            stem.name(),
            None,
            stem.element(),
            STEM_WEIGHT,
            false,
        );
        push(
            ContributionSource::Branch,
            branch.name(),
            None,
            branch.element(),
            BRANCH_WEIGHT,
            false,
        );
        for hidden in hidden_stems(branch) {
            let boosted = position == PillarPosition::Month && hidden.kind == QiKind::Primary;
            let amount = if boosted {
                hidden.weight * month_command
            } else {
                hidden.weight
            };
            push(
                ContributionSource::HiddenStem,
                hidden.stem.name(),
                Some(hidden.kind),
                hidden.stem.element(),
                amount,
                boosted,
            );
        }
    }

    let mut totals = WuxingScore::default();
    for (_, s) in per_pillar.iter() {
        totals += *s;
    }

    WuxingBreakdown {
        totals,
        per_pillar,
        contributions,
    }
}
