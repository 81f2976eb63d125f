//! Query world containing all probe-able geometry.
//!
//! The world is a flat list of flagged box brushes. It is immutable once the
//! arena is built; the controller only reads intersection results out of it.

use glam::Vec3;
use log::trace;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, Ray};
use parry3d::shape::SharedShape;

use super::flags::ContentFlags;
use super::query::ProbeHit;

/// Binary-search iterations for box casts (~0.025% path precision).
const CAST_ITERATIONS: u32 = 12;

/// A piece of geometry in the world.
#[derive(Debug, Clone)]
pub struct Brush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
    /// Content flags (solid, pipe, target).
    pub contents: ContentFlags,
}

/// The query world containing all geometry.
///
/// Immutable after arena construction; safe to share for read-only probes.
#[derive(Debug, Default)]
pub struct QueryWorld {
    brushes: Vec<Brush>,
    next_id: u32,
}

impl QueryWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box brush.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position in world space
    /// * `half_extents` - Half-size in each axis
    /// * `contents` - Content flags for probe filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        trace!("brush {id}: box at {center:?} half {half_extents:?} ({contents:?})");

        self.brushes.push(Brush {
            id,
            shape: SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            transform: Isometry::translation(center.x, center.y, center.z),
            contents,
        });

        id
    }

    /// Number of brushes in the world.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Content flags of a brush, if it exists.
    pub fn brush_contents(&self, id: u32) -> Option<ContentFlags> {
        self.find_brush(id).map(|b| b.contents)
    }

    /// World-space bounding box of a brush (min, max).
    ///
    /// Used by the controller to read a pipe's vertical extent and horizontal
    /// axis without caring about the underlying shape.
    pub fn brush_bounds(&self, id: u32) -> Option<(Vec3, Vec3)> {
        let brush = self.find_brush(id)?;
        let aabb = brush.shape.compute_aabb(&brush.transform);
        Some((
            Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z),
            Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z),
        ))
    }

    /// Cast a ray through the world.
    ///
    /// Returns the closest hit within `max_distance`, or `None`.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
    ) -> Option<ProbeHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, &Brush)> = None;

        for brush in &self.brushes {
            if !mask.intersects(brush.contents) {
                continue;
            }

            if let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) {
                let is_closer = closest.as_ref().map_or(true, |(dist, _)| toi < *dist);
                if toi <= max_distance && is_closer {
                    closest = Some((toi, brush));
                }
            }
        }

        closest.map(|(toi, brush)| {
            let hit_point = ray.point_at(toi);
            ProbeHit {
                point: Vec3::new(hit_point.x, hit_point.y, hit_point.z),
                normal: self.ray_hit_normal(&ray, toi, brush),
                fraction: toi / max_distance,
                brush: brush.id,
                contents: brush.contents,
            }
        })
    }

    /// Sweep an axis-aligned box through the world.
    ///
    /// `center` is the box center at the start of the sweep. The hit point in
    /// the result is the box center at the moment of contact. Marches along
    /// the path at sub-extent spacing so thin brushes are not stepped over,
    /// then binary-searches the bracketed segment for the contact fraction.
    pub fn boxcast(
        &self,
        center: Vec3,
        half_extents: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
    ) -> Option<ProbeHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 || max_distance <= 0.0 {
            return None;
        }

        // Started overlapping: immediate hit.
        if let Some(brush) = self.first_overlap(center, half_extents, mask) {
            return Some(ProbeHit {
                point: center,
                normal: -dir,
                fraction: 0.0,
                brush: brush.id,
                contents: brush.contents,
            });
        }

        // March to the first overlapping sample. Spacing stays below the
        // smallest box extent, so any brush crossing the path overlaps at
        // least one sample.
        let steps = ((max_distance / half_extents.min_element()).ceil() as u32).clamp(1, 64);
        let mut bracket = None;
        let mut prev = 0.0_f32;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let sample = center + dir * (max_distance * t);
            if self.first_overlap(sample, half_extents, mask).is_some() {
                bracket = Some((prev, t));
                break;
            }
            prev = t;
        }

        // Binary search the bracket for the contact fraction.
        let (mut lo, mut hi) = bracket?;
        for _ in 0..CAST_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            let test = center + dir * (max_distance * mid);
            if self.first_overlap(test, half_extents, mask).is_some() {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let contact_center = center + dir * (max_distance * hi);
        let brush = self.first_overlap(contact_center, half_extents, mask)?;
        let stop_center = center + dir * (max_distance * lo);

        let normal = self
            .box_surface_normal(contact_center, half_extents, brush)
            .unwrap_or(-dir);

        Some(ProbeHit {
            point: stop_center,
            normal,
            fraction: lo,
            brush: brush.id,
            contents: brush.contents,
        })
    }

    /// Find the first brush overlapping an axis-aligned box.
    ///
    /// This is the contact query behind pipe attachment: the controller asks
    /// whether its body volume currently touches a climbable brush.
    pub fn overlap(&self, center: Vec3, half_extents: Vec3, mask: ContentFlags) -> Option<u32> {
        self.first_overlap(center, half_extents, mask).map(|b| b.id)
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn find_brush(&self, id: u32) -> Option<&Brush> {
        self.brushes.iter().find(|b| b.id == id)
    }

    fn first_overlap(
        &self,
        center: Vec3,
        half_extents: Vec3,
        mask: ContentFlags,
    ) -> Option<&Brush> {
        let test_shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let test_transform = Isometry::translation(center.x, center.y, center.z);

        self.brushes.iter().find(|brush| {
            if !mask.intersects(brush.contents) {
                return false;
            }
            matches!(
                contact(
                    &test_transform,
                    test_shape.as_ref(),
                    &brush.transform,
                    brush.shape.as_ref(),
                    0.0,
                ),
                Ok(Some(_))
            )
        })
    }

    /// Surface normal of `brush` facing a nearby box, from a close-range
    /// contact query.
    fn box_surface_normal(&self, center: Vec3, half_extents: Vec3, brush: &Brush) -> Option<Vec3> {
        let test_shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let test_transform = Isometry::translation(center.x, center.y, center.z);

        let c = contact(
            &test_transform,
            test_shape.as_ref(),
            &brush.transform,
            brush.shape.as_ref(),
            0.25,
        )
        .ok()
        .flatten()?;

        // normal2 is the outward normal on the brush, pointing back at us.
        Some(Vec3::new(c.normal2.x, c.normal2.y, c.normal2.z))
    }

    fn ray_hit_normal(&self, ray: &Ray, toi: f32, brush: &Brush) -> Vec3 {
        if let Some(intersection) =
            brush
                .shape
                .cast_ray_and_get_normal(&brush.transform, ray, toi + 0.01, true)
        {
            Vec3::new(
                intersection.normal.x,
                intersection.normal.y,
                intersection.normal.z,
            )
        } else {
            let dir = Vec3::new(ray.dir.x, ray.dir.y, ray.dir.z);
            -dir.normalize_or_zero()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
