//! First-person controller gameplay systems.
//!
//! The crate is organized around one frame of controller work: raw input is
//! conditioned ([`input`]), the camera turns ([`aim`]), the locomotion state
//! machine drives the body ([`locomotion`]), the weapon fires and settles
//! ([`weapon`]), and [`player`] sequences it all. [`simulation`] wraps a
//! player and a static arena in a fixed-step, fully deterministic loop.

pub mod aim;
pub mod config;
pub mod curve;
pub mod input;
pub mod locomotion;
pub mod player;
pub mod random;
pub mod simulation;
pub mod target;
pub mod weapon;

pub use aim::{AimModel, CameraOrientation};
pub use config::{ConfigError, ControllerConfig, TargetConfig};
pub use curve::ResponseCurve;
pub use input::InputState;
pub use locomotion::{Locomotion, MovementMode};
pub use player::{FrameOutput, PlayerController};
pub use random::SeededRandom;
pub use simulation::{Simulation, SimulationConfig};
pub use target::Target;
