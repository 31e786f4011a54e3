// Special number derivation rule

use serde::{Deserialize, Serialize};

/// How a game's special ("bonus") number is carried by the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialRule {
    /// The last element of the drawn numbers is the special number.
    EmbeddedLast,
    /// The source supplies a distinct field; zero or absent means none.
    SeparateField,
    None,
}

impl SpecialRule {
    pub fn has_special(&self) -> bool {
        !matches!(self, SpecialRule::None)
    }

    pub fn resolve(&self, numbers: &[u32], separate: Option<u32>) -> Option<u32> {
        match self {
            SpecialRule::EmbeddedLast => numbers.last().copied(),
            SpecialRule::SeparateField => separate.filter(|value| *value > 0),
            SpecialRule::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_follows_rule() {
        let numbers = [3, 14, 15, 9, 26, 5, 7];
        assert_eq!(SpecialRule::EmbeddedLast.resolve(&numbers, Some(42)), Some(7));
        assert_eq!(SpecialRule::SeparateField.resolve(&numbers, Some(42)), Some(42));
        assert_eq!(SpecialRule::SeparateField.resolve(&numbers, Some(0)), None);
        assert_eq!(SpecialRule::SeparateField.resolve(&numbers, None), None);
        assert_eq!(SpecialRule::None.resolve(&numbers, Some(42)), None);
        assert_eq!(SpecialRule::EmbeddedLast.resolve(&[], None), None);
    }
}
