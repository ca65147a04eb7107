//! Collision participation classes and check groups

use serde::{Deserialize, Serialize};

/// How a body takes part in pairwise resolution.
///
/// The numeric weights matter: a pair is resolved only when neither side is
/// `Never` and the weights sum past `Active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionClass {
    #[default]
    Never,
    Lite,
    Passive,
    Active,
    Fixed,
}

impl CollisionClass {
    #[inline]
    pub const fn weight(self) -> u8 {
        match self {
            CollisionClass::Never => 0,
            CollisionClass::Lite => 1,
            CollisionClass::Passive => 2,
            CollisionClass::Active => 4,
            CollisionClass::Fixed => 8,
        }
    }

    pub fn from_weight(weight: u8) -> Option<Self> {
        match weight {
            0 => Some(CollisionClass::Never),
            1 => Some(CollisionClass::Lite),
            2 => Some(CollisionClass::Passive),
            4 => Some(CollisionClass::Active),
            8 => Some(CollisionClass::Fixed),
            _ => None,
        }
    }

    /// Whether a pair of classes gets resolved at all
    #[inline]
    pub fn pair_resolves(a: Self, b: Self) -> bool {
        a != CollisionClass::Never
            && b != CollisionClass::Never
            && a.weight() + b.weight() > CollisionClass::Active.weight()
    }
}

/// Check group bit set. `check` fires on a body when its `check_against`
/// shares a bit with the other body's group.
pub type CheckGroup = u8;

pub const GROUP_NONE: CheckGroup = 0;
pub const GROUP_A: CheckGroup = 1;
pub const GROUP_B: CheckGroup = 2;
pub const GROUP_BOTH: CheckGroup = GROUP_A | GROUP_B;

#[cfg(test)]
mod tests {
    use super::*;
    use CollisionClass::*;

    #[test]
    fn weights_round_trip() {
        for class in [Never, Lite, Passive, Active, Fixed] {
            assert_eq!(CollisionClass::from_weight(class.weight()), Some(class));
        }
        assert_eq!(CollisionClass::from_weight(3), None);
    }

    #[test]
    fn pair_eligibility_table() {
        assert!(!CollisionClass::pair_resolves(Never, Fixed));
        assert!(!CollisionClass::pair_resolves(Active, Never));
        assert!(!CollisionClass::pair_resolves(Lite, Passive));
        assert!(!CollisionClass::pair_resolves(Passive, Passive));
        assert!(!CollisionClass::pair_resolves(Lite, Lite));
        assert!(CollisionClass::pair_resolves(Lite, Active));
        assert!(CollisionClass::pair_resolves(Passive, Active));
        assert!(CollisionClass::pair_resolves(Active, Active));
        assert!(CollisionClass::pair_resolves(Passive, Fixed));
        assert!(CollisionClass::pair_resolves(Fixed, Fixed));
    }
}
