//! Ironsight Physics
//!
//! Spatial queries for the player controller. The controller never mutates
//! world geometry; it only reads probe results and writes velocity/position
//! commands back to its own kinematic body.
//!
//! # Key Types
//!
//! - [`QueryWorld`]: immutable brush soup answering ray/box/overlap queries
//! - [`ProbeHit`]: result of a successful probe (a miss is just `None`)
//! - [`RigidBody`]: the single body the controller owns and integrates
//!
//! All queries are synchronous and deterministic: the same world and the same
//! probe always return the same answer.

pub mod body;
pub mod flags;
pub mod query;
pub mod world;

pub use body::RigidBody;
pub use flags::ContentFlags;
pub use query::ProbeHit;
pub use world::QueryWorld;
