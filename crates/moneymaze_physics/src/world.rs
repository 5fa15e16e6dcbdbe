//! Obstacle set and collision queries

use crate::collision::{aabb_vs_aabb, point_in_shrunk_aabb, CollisionLayer, Contact};
use crate::obstacle::{Obstacle, ObstacleKey};
use crate::shapes::Capsule;
use moneymaze_math::Vec3;
use slotmap::SlotMap;

/// Result of resolving a capsule move against the obstacle set
#[derive(Clone, Debug)]
pub struct CapsuleResolution {
    /// The move to apply (horizontal components zeroed when anything was hit)
    pub movement: Vec3,
    /// Every obstacle the sweep box touched, with its overlap
    pub contacts: Vec<(ObstacleKey, Contact)>,
}

impl CapsuleResolution {
    /// Whether any obstacle blocked the move
    pub fn is_blocked(&self) -> bool {
        !self.contacts.is_empty()
    }
}

/// The static geometry of a maze: walls plus currently closed doors
///
/// Obstacles are created once when the level is built and only ever removed (when a door
/// finishes opening). Keys are generational, so removal succeeds at most once per obstacle.
#[derive(Default)]
pub struct ObstacleSet {
    obstacles: SlotMap<ObstacleKey, Obstacle>,
}

impl ObstacleSet {
    /// Create an empty obstacle set
    pub fn new() -> Self {
        Self {
            obstacles: SlotMap::with_key(),
        }
    }

    /// Add an obstacle and return its key
    pub fn insert(&mut self, obstacle: Obstacle) -> ObstacleKey {
        self.obstacles.insert(obstacle)
    }

    /// Remove an obstacle; returns `None` if it was already removed
    pub fn remove(&mut self, key: ObstacleKey) -> Option<Obstacle> {
        self.obstacles.remove(key)
    }

    /// Get an obstacle by key
    pub fn get(&self, key: ObstacleKey) -> Option<&Obstacle> {
        self.obstacles.get(key)
    }

    /// Whether the key still refers to an active obstacle
    pub fn contains(&self, key: ObstacleKey) -> bool {
        self.obstacles.contains_key(key)
    }

    /// Number of active obstacles
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether there are no active obstacles
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Iterate over all active obstacles
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleKey, &Obstacle)> {
        self.obstacles.iter()
    }

    /// Iterate over obstacles visible to the layer mask
    pub fn iter_layer(&self, mask: CollisionLayer) -> impl Iterator<Item = (ObstacleKey, &Obstacle)> {
        self.obstacles.iter().filter(move |(_, o)| o.matches(mask))
    }

    /// Resolve a capsule's proposed move
    ///
    /// The capsule's bounding box is placed at `position + movement`. If it touches any
    /// obstacle in `mask`, both horizontal components of the move are zeroed: the player stops
    /// dead instead of sliding along the wall. The vertical component is left alone.
    pub fn resolve_capsule_move(
        &self,
        position: Vec3,
        movement: Vec3,
        capsule: &Capsule,
        mask: CollisionLayer,
    ) -> CapsuleResolution {
        let sweep = capsule.bounds_at(position + movement);

        let contacts: Vec<(ObstacleKey, Contact)> = self
            .iter_layer(mask)
            .filter_map(|(key, obstacle)| aabb_vs_aabb(&sweep, &obstacle.aabb).map(|c| (key, c)))
            .collect();

        let mut movement = movement;
        if !contacts.is_empty() {
            movement.x = 0.0;
            movement.z = 0.0;
        }

        CapsuleResolution { movement, contacts }
    }

    /// Find an obstacle whose box, shrunk by `radius`, contains the point
    pub fn blocking_point(&self, point: Vec3, radius: f32, mask: CollisionLayer) -> Option<ObstacleKey> {
        self.iter_layer(mask)
            .find(|(_, obstacle)| point_in_shrunk_aabb(point, &obstacle.aabb, radius))
            .map(|(key, _)| key)
    }

    /// Obstacles that the point test can never hit because shrinking inverts them
    pub fn degenerate_for_radius(&self, radius: f32) -> impl Iterator<Item = (ObstacleKey, &Obstacle)> {
        self.obstacles
            .iter()
            .filter(move |(_, o)| o.aabb.expanded(-radius).is_inverted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Aabb;

    /// A wall running along X at z = -2, 0.36 thick, 1.9 tall
    fn north_wall() -> Obstacle {
        Obstacle::wall(Aabb::from_center_size(
            Vec3::new(0.0, 0.95, -2.0),
            Vec3::new(8.0, 1.9, 0.36),
        ))
    }

    #[test]
    fn test_insert_remove_once() {
        let mut set = ObstacleSet::new();
        let key = set.insert(north_wall());
        assert_eq!(set.len(), 1);
        assert!(set.contains(key));

        assert!(set.remove(key).is_some());
        assert!(set.remove(key).is_none());
        assert!(!set.contains(key));
        assert!(set.is_empty());
    }

    #[test]
    fn test_removed_key_not_revived_by_reuse() {
        let mut set = ObstacleSet::new();
        let old = set.insert(north_wall());
        set.remove(old);
        let new = set.insert(north_wall());

        assert_ne!(old, new);
        assert!(set.get(old).is_none());
        assert!(set.get(new).is_some());
    }

    #[test]
    fn test_capsule_move_free() {
        let set = ObstacleSet::new();
        let capsule = Capsule::default();
        let movement = Vec3::new(0.1, 0.0, -0.1);

        let resolution = set.resolve_capsule_move(Vec3::ZERO, movement, &capsule, CollisionLayer::SOLID);
        assert_eq!(resolution.movement, movement);
        assert!(!resolution.is_blocked());
    }

    #[test]
    fn test_capsule_move_blocked_zeroes_both_axes() {
        let mut set = ObstacleSet::new();
        let wall = set.insert(north_wall());
        let capsule = Capsule::default();

        // Next z = -1.5 puts the capsule's north face at -1.84, past the wall face at -1.82
        let position = Vec3::new(0.0, 0.0, -1.45);
        let movement = Vec3::new(0.05, 0.0, -0.05);

        let resolution = set.resolve_capsule_move(position, movement, &capsule, CollisionLayer::SOLID);
        assert_eq!(resolution.movement.x, 0.0);
        assert_eq!(resolution.movement.z, 0.0);
        assert_eq!(resolution.contacts.len(), 1);
        assert_eq!(resolution.contacts[0].0, wall);
    }

    #[test]
    fn test_capsule_move_keeps_vertical_component() {
        let mut set = ObstacleSet::new();
        set.insert(north_wall());
        let capsule = Capsule::default();

        let resolution = set.resolve_capsule_move(
            Vec3::new(0.0, 0.0, -1.5),
            Vec3::new(0.0, 0.25, -0.1),
            &capsule,
            CollisionLayer::SOLID,
        );
        assert!(resolution.is_blocked());
        assert_eq!(resolution.movement, Vec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn test_capsule_move_ignores_filtered_layers() {
        let mut set = ObstacleSet::new();
        set.insert(Obstacle::door(Aabb::from_center_size(
            Vec3::new(0.0, 0.9, -2.0),
            Vec3::new(1.0, 1.8, 0.18),
        )));
        let capsule = Capsule::default();
        let movement = Vec3::new(0.0, 0.0, -0.3);

        let walls_only = set.resolve_capsule_move(Vec3::new(0.0, 0.0, -1.5), movement, &capsule, CollisionLayer::WALL);
        assert!(!walls_only.is_blocked());

        let solid = set.resolve_capsule_move(Vec3::new(0.0, 0.0, -1.5), movement, &capsule, CollisionLayer::SOLID);
        assert!(solid.is_blocked());
    }

    #[test]
    fn test_blocking_point() {
        let mut set = ObstacleSet::new();
        let block = set.insert(Obstacle::wall(Aabb::from_center_size(
            Vec3::new(0.0, 1.1, 0.0),
            Vec3::new(2.0, 2.2, 2.0),
        )));

        assert_eq!(set.blocking_point(Vec3::new(0.2, 1.6, 0.2), 0.5, CollisionLayer::SOLID), Some(block));
        assert_eq!(set.blocking_point(Vec3::new(0.8, 1.6, 0.2), 0.5, CollisionLayer::SOLID), None);
    }

    #[test]
    fn test_degenerate_for_radius() {
        let mut set = ObstacleSet::new();
        set.insert(Obstacle::wall(Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0))));
        let slab = set.insert(Obstacle::door(Aabb::from_center_size(
            Vec3::ZERO,
            Vec3::new(1.8, 2.4, 0.16),
        )));

        let degenerate: Vec<ObstacleKey> = set.degenerate_for_radius(0.5).map(|(k, _)| k).collect();
        assert_eq!(degenerate, vec![slab]);
    }
}
