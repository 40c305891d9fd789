use bevy::math::IVec3;

/// One of the six axis-aligned faces of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFacing {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl BlockFacing {
    pub const ALL: [BlockFacing; 6] = [
        BlockFacing::North,
        BlockFacing::East,
        BlockFacing::South,
        BlockFacing::West,
        BlockFacing::Up,
        BlockFacing::Down,
    ];

    #[must_use]
    pub fn offset(self) -> IVec3 {
        match self {
            BlockFacing::North => IVec3::NEG_Z,
            BlockFacing::East => IVec3::X,
            BlockFacing::South => IVec3::Z,
            BlockFacing::West => IVec3::NEG_X,
            BlockFacing::Up => IVec3::Y,
            BlockFacing::Down => IVec3::NEG_Y,
        }
    }

    /// Iterate the six neighbours of `pos`.
    pub fn neighbours(pos: IVec3) -> impl Iterator<Item = IVec3> {
        Self::ALL.into_iter().map(move |face| pos + face.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_unit_steps() {
        let origin = IVec3::new(4, 10, -2);
        let around: Vec<IVec3> = BlockFacing::neighbours(origin).collect();
        assert_eq!(around.len(), 6);
        for pos in around {
            let d = (pos - origin).abs();
            assert_eq!(d.x + d.y + d.z, 1);
        }
    }
}
