//! Static obstacle types

use crate::collision::CollisionLayer;
use crate::shapes::Aabb;
use slotmap::new_key_type;

new_key_type! {
    /// Key to an obstacle in an [`ObstacleSet`](crate::ObstacleSet)
    ///
    /// Generational: once an obstacle is removed its key never resolves again, even if the
    /// slot is reused.
    pub struct ObstacleKey;
}

/// A wall segment or closed door
#[derive(Clone, Debug)]
pub struct Obstacle {
    /// World-space bounds
    pub aabb: Aabb,
    /// Layer used to filter which resolvers see this obstacle
    pub layer: CollisionLayer,
    /// Human-readable name for logs
    pub label: String,
}

impl Obstacle {
    /// Create a wall obstacle
    pub fn wall(aabb: Aabb) -> Self {
        Self {
            aabb,
            layer: CollisionLayer::WALL,
            label: String::from("wall"),
        }
    }

    /// Create a door obstacle
    pub fn door(aabb: Aabb) -> Self {
        Self {
            aabb,
            layer: CollisionLayer::DOOR,
            label: String::from("door"),
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Whether this obstacle is visible to the given layer mask
    pub fn matches(&self, mask: CollisionLayer) -> bool {
        self.layer.intersects(mask)
    }
}
