//! Collision groups and query filters.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (terrain, walls)
    Environment = 1 << 0,
    /// Player aircraft
    Player = 1 << 1,
    /// Hostile aircraft and ground targets
    Enemy = 1 << 2,
    /// Player bullets
    PlayerProjectile = 1 << 3,
}

impl CollisionGroup {
    fn bits(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Membership and filter for static environment colliders.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Self::Environment.bits(), Group::ALL)
    }

    /// Membership and filter for enemy colliders.
    pub fn enemy() -> InteractionGroups {
        InteractionGroups::new(
            Self::Enemy.bits(),
            Self::Environment.bits() | Self::Player.bits() | Self::PlayerProjectile.bits(),
        )
    }

    /// Ray filter for a player bullet that should only see the given group.
    pub fn bullet_against(target: CollisionGroup) -> InteractionGroups {
        InteractionGroups::new(Self::PlayerProjectile.bits(), target.bits())
    }
}
