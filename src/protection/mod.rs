//! Land claims and block reinforcement.
//!
//! A claim is an inclusive box of block positions owned by a player uid.
//! Building inside a claim is granted to the owner and to the uids listed in
//! `allowed`; everywhere outside of claims is open. Reinforced blocks cannot
//! be used as fuel by spreading fire.
use bevy::math::IVec3;
use bevy::prelude::Resource;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandClaim {
    pub owner: String,
    pub min: IVec3,
    pub max: IVec3,
    pub allowed: Vec<String>,
}

impl LandClaim {
    #[must_use]
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    #[must_use]
    pub fn grants(&self, player: &str) -> bool {
        self.owner == player || self.allowed.iter().any(|p| p == player)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResponse {
    Granted,
    DeniedByClaim,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct Protection {
    pub claims: Vec<LandClaim>,
    pub reinforced: HashSet<IVec3>,
}

impl Protection {
    /// Build-or-break access for `player` at `pos`. Every claim covering the
    /// position has to grant it.
    #[must_use]
    pub fn test_access(&self, player: &str, pos: IVec3) -> AccessResponse {
        let denied = self
            .claims
            .iter()
            .any(|claim| claim.contains(pos) && !claim.grants(player));
        if denied { AccessResponse::DeniedByClaim } else { AccessResponse::Granted }
    }

    #[must_use]
    pub fn is_reinforced(&self, pos: IVec3) -> bool {
        self.reinforced.contains(&pos)
    }
}
