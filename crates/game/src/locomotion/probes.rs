//! World probes used by the locomotion state machine.
//!
//! Every probe is a read-only query against the world: a ground ray below
//! the feet, a chest-height sweep plus a downward edge ray for ledges, an
//! overlap test for pipes, and a clearance check for mantling.

use glam::Vec3;

use ironsight_physics::{ContentFlags, ProbeHit, QueryWorld};

use crate::config::MovementConfig;

use super::LedgeGrab;

/// The ground ray starts slightly above the feet so a body resting exactly
/// on a surface still registers.
const GROUND_PROBE_LIFT: f32 = 0.1;

/// Surfaces steeper than this (by normal.y) do not count as ground or ledge
/// tops.
const WALKABLE_NORMAL_Y: f32 = 0.7;

/// Find the ground surface under the feet, if any.
pub(super) fn ground_hit(
    world: &QueryWorld,
    config: &MovementConfig,
    position: Vec3,
) -> Option<ProbeHit> {
    let origin = position + Vec3::Y * GROUND_PROBE_LIFT;
    world
        .raycast(
            origin,
            -Vec3::Y,
            config.ground_cast_distance + GROUND_PROBE_LIFT,
            ContentFlags::MASK_PROBE,
        )
        .filter(|hit| hit.normal.y > WALKABLE_NORMAL_Y)
}

/// Look for a grabbable ledge in front of the body.
///
/// A chest-height sweep finds a vertical wall within reach; a downward ray
/// just past the wall face then finds the walkable top edge. The edge must
/// be above the feet for the grab to count.
pub(super) fn find_ledge(
    world: &QueryWorld,
    config: &MovementConfig,
    position: Vec3,
    flat_forward: Vec3,
) -> Option<LedgeGrab> {
    let chest = position + Vec3::Y * (config.body_height * 0.75);
    let half = Vec3::new(config.body_radius, 0.1, config.body_radius);
    let wall = world.boxcast(
        chest,
        half,
        flat_forward,
        config.ledge_reach,
        ContentFlags::MASK_PROBE,
    )?;

    let outward = Vec3::new(wall.normal.x, 0.0, wall.normal.z).normalize_or_zero();
    if outward.length_squared() < 0.5 {
        // Hit a floor or ceiling face, not a wall.
        return None;
    }

    let face = wall.point + flat_forward * config.body_radius;
    let probe_origin =
        face - outward * config.ledge_edge_inset + Vec3::Y * config.ledge_probe_height;
    let top = world.raycast(
        probe_origin,
        -Vec3::Y,
        config.ledge_probe_height + 0.4,
        ContentFlags::MASK_PROBE,
    )?;
    if top.normal.y < WALKABLE_NORMAL_Y || top.point.y <= position.y {
        return None;
    }

    Some(LedgeGrab {
        grab_point: top.point,
        normal: outward,
    })
}

/// Whether the grabbed edge keeps going one probe step to the side of the
/// current hang position.
pub(super) fn ledge_continues(
    world: &QueryWorld,
    config: &MovementConfig,
    grab: &LedgeGrab,
    hang_position: Vec3,
    side: Vec3,
) -> bool {
    let inward = -grab.normal;
    let hand = Vec3::new(hang_position.x, grab.grab_point.y, hang_position.z)
        + inward * (config.hang_depth + config.ledge_edge_inset);
    let origin = hand + side * config.shimmy_probe_offset + Vec3::Y * 0.2;
    world
        .raycast(origin, -Vec3::Y, 0.5, ContentFlags::MASK_PROBE)
        .is_some_and(|hit| hit.normal.y > WALKABLE_NORMAL_Y)
}

/// Where a mantle over `grab` puts the feet.
pub(super) fn mantle_destination(config: &MovementConfig, grab: &LedgeGrab) -> Vec3 {
    grab.grab_point - grab.normal * config.mantle_depth + Vec3::Y * 0.02
}

/// Whether a full body volume fits standing at the mantle destination.
pub(super) fn mantle_clear(world: &QueryWorld, config: &MovementConfig, grab: &LedgeGrab) -> bool {
    let feet = mantle_destination(config, grab);
    let center = feet + Vec3::Y * (config.body_height * 0.5 + 0.05);
    let half = Vec3::new(
        config.body_radius,
        config.body_height * 0.5 - 0.05,
        config.body_radius,
    );
    world.overlap(center, half, ContentFlags::MASK_PROBE).is_none()
}

/// The climbable pipe currently touching the body volume, if any.
pub(super) fn pipe_overlap(
    world: &QueryWorld,
    config: &MovementConfig,
    position: Vec3,
) -> Option<u32> {
    let center = position + Vec3::Y * (config.body_height * 0.5);
    let half = Vec3::new(
        config.body_radius,
        config.body_height * 0.5,
        config.body_radius,
    );
    world.overlap(center, half, ContentFlags::PIPE)
}
