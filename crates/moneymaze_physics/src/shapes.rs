//! Collision shapes for maze physics
//!
//! These are lightweight primitives used for collision detection. Walls and doors are
//! axis-aligned boxes; the player is a capsule approximated by its bounding box.

use moneymaze_math::Vec3;

/// Default capsule radius
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.34;

/// Default capsule height (feet to top of head)
pub const DEFAULT_CAPSULE_HEIGHT: f32 = 1.45;

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create an AABB centered at a position with the given full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size in each dimension
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside or on the AABB
    ///
    /// An inverted box (min > max on some axis) contains nothing.
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if two boxes overlap; touching faces count as overlap
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    /// Grow the box by `amount` on every side (negative shrinks)
    ///
    /// Shrinking by more than half the size leaves an inverted box; no correction is applied.
    pub fn expanded(&self, amount: f32) -> Self {
        let delta = Vec3::splat(amount);
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }

    /// True if min exceeds max on any axis
    pub fn is_inverted(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp_components(self.min, self.max)
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Player collision volume
///
/// Only its bounding box is ever tested: from the feet position minus (radius, 0, radius)
/// up to plus (radius, height, radius).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
}

impl Default for Capsule {
    fn default() -> Self {
        Self::new(DEFAULT_CAPSULE_RADIUS, DEFAULT_CAPSULE_HEIGHT)
    }
}

impl Capsule {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    /// Bounding box of the capsule standing at `feet`
    pub fn bounds_at(&self, feet: Vec3) -> Aabb {
        Aabb::new(
            feet + Vec3::new(-self.radius, 0.0, -self.radius),
            feet + Vec3::new(self.radius, self.height, self.radius),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 0.0001
    }

    #[test]
    fn test_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.95, -4.0), Vec3::new(8.0, 1.9, 0.36));
        assert!(approx(aabb.min, Vec3::new(-4.0, 0.0, -4.18)));
        assert!(approx(aabb.max, Vec3::new(4.0, 1.9, -3.82)));
        assert!(approx(aabb.center(), Vec3::new(0.0, 0.95, -4.0)));
        assert!(approx(aabb.size(), Vec3::new(8.0, 1.9, 0.36)));
    }

    #[test]
    fn test_contains() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains(Vec3::splat(0.5)));
        assert!(aabb.contains(Vec3::ZERO)); // corner
        assert!(!aabb.contains(Vec3::new(-0.1, 0.5, 0.5)));
    }

    #[test]
    fn test_intersects_touching() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_separated() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = a.translated(Vec3::new(0.0, 0.0, 1.01));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_expanded_negative_shrinks() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(2.0)).expanded(-0.5);
        assert_eq!(aabb.min, Vec3::splat(0.5));
        assert_eq!(aabb.max, Vec3::splat(1.5));
        assert!(!aabb.is_inverted());
    }

    #[test]
    fn test_thin_box_inverts_when_shrunk() {
        // Door-like slab: 0.18 thick, shrunk by 0.5
        let slab = Aabb::from_center_size(Vec3::ZERO, Vec3::new(1.8, 2.4, 0.16));
        let shrunk = slab.expanded(-0.5);
        assert!(shrunk.is_inverted());
        assert!(!shrunk.contains(Vec3::ZERO));
    }

    #[test]
    fn test_capsule_bounds() {
        let capsule = Capsule::default();
        let bounds = capsule.bounds_at(Vec3::new(1.5, 1.2, 1.5));
        assert!((bounds.min.x - 1.16).abs() < 0.0001);
        assert_eq!(bounds.min.y, 1.2);
        assert!((bounds.max.y - 2.65).abs() < 0.0001);
        assert!((bounds.max.z - 1.84).abs() < 0.0001);
    }

    #[test]
    fn test_closest_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.closest_point(Vec3::new(2.0, 0.5, -1.0)), Vec3::new(1.0, 0.5, 0.0));
    }
}
