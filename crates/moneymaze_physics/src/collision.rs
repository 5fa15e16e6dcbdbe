//! Collision detection for maze obstacles
//!
//! Provides box-vs-box overlap for the capsule resolver, shrunk-box point containment for the
//! direct resolver, and collision layers for choosing which obstacles block.

use bitflags::bitflags;

use crate::shapes::Aabb;
use moneymaze_math::Vec3;

bitflags! {
    /// Collision layers an obstacle can belong to
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Static maze walls
        const WALL = 1 << 0;
        /// Checkpoint doors (removed once opened)
        const DOOR = 1 << 1;
        /// Everything that stops the player
        const SOLID = Self::WALL.bits() | Self::DOOR.bits();
        /// All layers
        const ALL = 0xFFFFFFFF;
    }
}

/// Contact information from a box overlap
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Center of the overlap region
    pub point: Vec3,
    /// Axis normal pointing from the second box toward the first
    pub normal: Vec3,
    /// Overlap depth along the normal (zero when only touching)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec3, normal: Vec3, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual overlap (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Test AABB vs AABB collision
///
/// Returns a contact if the AABBs intersect or touch. The normal is the axis of least overlap.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    if !a.intersects(b) {
        return None;
    }

    let overlap_x = (a.max.x.min(b.max.x) - a.min.x.max(b.min.x)).max(0.0);
    let overlap_y = (a.max.y.min(b.max.y) - a.min.y.max(b.min.y)).max(0.0);
    let overlap_z = (a.max.z.min(b.max.z) - a.min.z.max(b.min.z)).max(0.0);

    let a_center = a.center();
    let b_center = b.center();

    let mut min_overlap = overlap_x;
    let mut normal = if a_center.x < b_center.x { -Vec3::X } else { Vec3::X };

    if overlap_y < min_overlap {
        min_overlap = overlap_y;
        normal = if a_center.y < b_center.y { -Vec3::Y } else { Vec3::Y };
    }
    if overlap_z < min_overlap {
        min_overlap = overlap_z;
        normal = if a_center.z < b_center.z { -Vec3::Z } else { Vec3::Z };
    }

    let overlap_min = a.min.max_components(b.min);
    let overlap_max = a.max.min_components(b.max);
    let point = (overlap_min + overlap_max) * 0.5;

    Some(Contact::new(point, normal, min_overlap))
}

/// Test a point against a box shrunk inward by `radius`
///
/// Equivalent to asking whether a sphere of that radius around the point would sit fully
/// inside the box's interior margin. Boxes thinner than `2 * radius` invert and never report
/// a hit.
pub fn point_in_shrunk_aabb(point: Vec3, aabb: &Aabb, radius: f32) -> bool {
    aabb.expanded(-radius).contains(point)
}
