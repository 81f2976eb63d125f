//! Weapon systems: fire control and the viewmodel pose.

pub mod fire;
pub mod pose;

pub use fire::{FireControl, ShotEvent, ShotHit};
pub use pose::WeaponPose;
