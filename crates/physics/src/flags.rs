//! Content flags for probe filtering.
//!
//! Every brush in the query world carries a set of content flags. Probes pass
//! a mask and only brushes intersecting that mask are considered, so a ledge
//! probe can ignore targets and a shot ray can ignore climbable pipes.

use serde::{Deserialize, Serialize};

/// Content flags describe what kind of object a brush is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space - nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry - walls, floors, ledges.
    pub const SOLID: Self = Self(1 << 0);

    /// Climbable pipe. Contact while airborne attaches the player to it.
    pub const PIPE: Self = Self(1 << 1);

    /// Shootable target carrying hit capability.
    pub const TARGET: Self = Self(1 << 2);

    /// Mask for movement probes (ground, ledge, mantle clearance).
    pub const MASK_PROBE: Self = Self(Self::SOLID.0);

    /// Mask for shot rays: world geometry and targets both stop bullets.
    pub const MASK_SHOT: Self = Self(Self::SOLID.0 | Self::TARGET.0);

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ContentFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
