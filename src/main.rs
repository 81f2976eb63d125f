//! Headless demo driver.
//!
//! Runs a scripted input sequence through the simulation: walk down-range,
//! sprint, hop, then aim down sights and clear the target lane. Mode changes
//! and shot results are logged; the final summary prints where the body
//! ended up and how many targets fell.

use glam::Vec2;
use log::info;

use ironsight_game::{
    ConfigError, ControllerConfig, InputState, MovementMode, Simulation, SimulationConfig,
};

const FRAMES: u32 = 600;

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut sim = Simulation::new(ControllerConfig::default(), SimulationConfig::default())?;

    let mut shots = 0u32;
    let mut last_mode = MovementMode::Grounded;
    for frame in 0..FRAMES {
        let input = script(frame);
        let output = sim.tick(&input);

        if output.shot.is_some() {
            shots += 1;
        }
        if output.mode != last_mode {
            info!("frame {frame}: {last_mode:?} -> {:?}", output.mode);
            last_mode = output.mode;
        }
    }

    let downed = sim.targets().iter().filter(|t| t.is_hit()).count();
    info!(
        "finished after {} frames: position {:?}, {} shots fired, {}/{} targets down",
        sim.frame(),
        sim.body().position,
        shots,
        downed,
        sim.targets().len()
    );
    Ok(())
}

fn script(frame: u32) -> InputState {
    match frame {
        // Walk down-range for a second
        0..=59 => InputState {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        },
        // Break into a sprint
        60..=119 => InputState {
            movement: Vec2::new(0.0, 1.0),
            sprint_pressed: frame == 60,
            ..Default::default()
        },
        // Stop and hop in place
        120..=179 => InputState {
            jump_pressed: frame == 120,
            ..Default::default()
        },
        // Aim down sights and work the trigger
        180..=419 => InputState {
            ads_value: 1.0,
            fire_value: 1.0,
            ..Default::default()
        },
        // Sweep the camera around to cool down
        _ => InputState {
            aim: Vec2::new(1.0, 0.0),
            ..Default::default()
        },
    }
}
