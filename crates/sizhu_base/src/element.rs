//! Five elements (五行) and yin/yang polarity.

use serde::{Deserialize, Serialize};

/// The five elements in generating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generating order (0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// Chinese name (木火土金水).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// English name.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// 0-based index in generating order.
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element this one generates (木生火, 火生土, ...).
    pub const fn generates(self) -> Element {
        ALL_ELEMENTS[((self.index() + 1) % 5) as usize]
    }

    /// Element this one controls (木剋土, 土剋水, ...).
    pub const fn controls(self) -> Element {
        ALL_ELEMENTS[((self.index() + 2) % 5) as usize]
    }

    /// Parse from the Chinese character.
    pub fn from_char(c: char) -> Option<Element> {
        ALL_ELEMENTS.into_iter().find(|e| e.name().starts_with(c))
    }
}

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Polarity of a position in a cycle: even indices are yang.
    pub const fn from_index(index: u8) -> Polarity {
        if index % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    /// Chinese name (陽/陰).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yang => "陽",
            Self::Yin => "陰",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, e) in ALL_ELEMENTS.iter().enumerate() {
            assert_eq!(e.index() as usize, i);
        }
    }

    #[test]
    fn generating_cycle() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
    }

    #[test]
    fn controlling_cycle() {
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Earth.controls(), Element::Water);
        assert_eq!(Element::Metal.controls(), Element::Wood);
    }

    #[test]
    fn from_char_roundtrip() {
        for e in ALL_ELEMENTS {
            let c = e.name().chars().next().unwrap();
            assert_eq!(Element::from_char(c), Some(e));
        }
        assert_eq!(Element::from_char('x'), None);
    }

    #[test]
    fn polarity_parity() {
        assert_eq!(Polarity::from_index(0), Polarity::Yang);
        assert_eq!(Polarity::from_index(7), Polarity::Yin);
    }
}
