//! Construction and burn stages of a bonfire.
//!
//! The stage is the primary state of a bonfire. The placed block is always
//! the `bonfire-<code>` variant of the current stage, so a loaded world gives
//! the stage back through [`BonfireStage::from_code`].
//!
//! ```text
//! Base ──┐
//!        ├─> Construct1 -> Construct2 -> Construct3 ──ignite──> Lit ──out──> Extinct
//! Extinct┘                               (refuel)                              │
//!    ^────────────────────────────────────────────────────────────────────────┘
//! ```
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BonfireStage {
    #[default]
    Base,
    Construct1,
    Construct2,
    /// Fully built, holds fuel, not burning.
    Construct3,
    Lit,
    /// Burned out, rebuilt from `Construct1`.
    Extinct,
}

impl BonfireStage {
    pub const ALL: [BonfireStage; 6] = [
        BonfireStage::Base,
        BonfireStage::Construct1,
        BonfireStage::Construct2,
        BonfireStage::Construct3,
        BonfireStage::Lit,
        BonfireStage::Extinct,
    ];

    /// Variant code used in the block name.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            BonfireStage::Base => "base",
            BonfireStage::Construct1 => "construct1",
            BonfireStage::Construct2 => "construct2",
            BonfireStage::Construct3 => "construct3",
            BonfireStage::Lit => "lit",
            BonfireStage::Extinct => "extinct",
        }
    }

    /// Parse a variant code. `cold` is the older name of the built, unlit bonfire.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "base" => BonfireStage::Base,
            "construct1" => BonfireStage::Construct1,
            "construct2" => BonfireStage::Construct2,
            "construct3" | "cold" => BonfireStage::Construct3,
            "lit" => BonfireStage::Lit,
            "extinct" => BonfireStage::Extinct,
            _ => return None,
        })
    }

    /// Stage reached by adding one unit of construction material, if any.
    #[must_use]
    pub fn next_construction_stage(self) -> Option<Self> {
        match self {
            BonfireStage::Base | BonfireStage::Extinct => Some(BonfireStage::Construct1),
            BonfireStage::Construct1 => Some(BonfireStage::Construct2),
            BonfireStage::Construct2 => Some(BonfireStage::Construct3),
            BonfireStage::Construct3 | BonfireStage::Lit => None,
        }
    }

    #[must_use]
    pub fn is_lit(self) -> bool {
        self == BonfireStage::Lit
    }

    #[must_use]
    pub fn is_under_construction(self) -> bool {
        self.next_construction_stage().is_some()
    }
}

impl fmt::Display for BonfireStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for stage in BonfireStage::ALL {
            assert_eq!(BonfireStage::from_code(stage.code()), Some(stage));
        }
        assert_eq!(BonfireStage::from_code("cold"), Some(BonfireStage::Construct3));
        assert_eq!(BonfireStage::from_code("burning"), None);
    }

    #[test]
    fn construction_advances_one_stage_at_a_time() {
        let mut stage = BonfireStage::Base;
        let mut path = vec![stage];
        while let Some(next) = stage.next_construction_stage() {
            stage = next;
            path.push(stage);
        }
        assert_eq!(
            path,
            vec![
                BonfireStage::Base,
                BonfireStage::Construct1,
                BonfireStage::Construct2,
                BonfireStage::Construct3
            ]
        );
    }

    #[test]
    fn extinct_restarts_at_first_construction_stage() {
        assert_eq!(
            BonfireStage::Extinct.next_construction_stage(),
            Some(BonfireStage::Construct1)
        );
        assert_eq!(BonfireStage::Lit.next_construction_stage(), None);
    }
}
