//! Level templates
//!
//! A level describes maze geometry as plain data: wall segments, free-standing blocks,
//! checkpoints with their doors, the exit gate, and where the player starts. Levels are
//! loaded from and saved to RON files, or taken from the built-in layouts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use moneymaze_math::Vec3;
use moneymaze_physics::Aabb;

/// Default wall height
pub const DEFAULT_WALL_HEIGHT: f32 = 1.9;

/// Default wall thickness
pub const DEFAULT_WALL_THICKNESS: f32 = 0.36;

/// Default checkpoint door size
pub const DEFAULT_DOOR_SIZE: [f32; 3] = [1.0, 1.8, 0.18];

/// Offset of a default door from its checkpoint along +Z
pub const DEFAULT_DOOR_OFFSET_Z: f32 = 0.55;

/// Exit gate size
pub const EXIT_GATE_SIZE: [f32; 3] = [1.18, 2.3, 0.18];

fn default_spawn() -> [f32; 3] {
    [1.5, 1.2, 1.5]
}

fn default_wall_height() -> f32 {
    DEFAULT_WALL_HEIGHT
}

fn default_wall_thickness() -> f32 {
    DEFAULT_WALL_THICKNESS
}

/// An axis-aligned box given by center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxTemplate {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

impl BoxTemplate {
    pub fn new(center: [f32; 3], size: [f32; 3]) -> Self {
        Self { center, size }
    }

    /// World-space bounds
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.center.into(), self.size.into())
    }

    /// Check that the box has finite coordinates and a positive size
    pub fn check(&self) -> Result<(), &'static str> {
        if self.center.iter().chain(&self.size).any(|v| !v.is_finite()) {
            return Err("coordinates must be finite");
        }
        if self.size.iter().any(|&v| v <= 0.0) {
            return Err("size must be positive on every axis");
        }
        Ok(())
    }
}

/// A straight wall from one floor point (x, z) to another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// A checkpoint trigger with its question and the door it controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointTemplate {
    /// Floor position (x, z)
    pub position: [f32; 2],
    /// Question shown when the player interacts
    pub question: String,
    /// Door box; `None` places a default door just past the checkpoint
    #[serde(default)]
    pub door: Option<BoxTemplate>,
    /// Checkpoints with no door still adjust the score
    #[serde(default = "default_true")]
    pub has_door: bool,
}

fn default_true() -> bool {
    true
}

impl CheckpointTemplate {
    pub fn new(x: f32, z: f32, question: impl Into<String>) -> Self {
        Self {
            position: [x, z],
            question: question.into(),
            door: None,
            has_door: true,
        }
    }

    /// Use an explicit door box
    pub fn with_door(mut self, door: BoxTemplate) -> Self {
        self.door = Some(door);
        self.has_door = true;
        self
    }

    /// No door at all
    pub fn without_door(mut self) -> Self {
        self.door = None;
        self.has_door = false;
        self
    }

    /// Door bounds, if this checkpoint has a door
    pub fn door_box(&self) -> Option<Aabb> {
        if !self.has_door {
            return None;
        }
        let door = self.door.unwrap_or_else(|| {
            let [x, z] = self.position;
            let [_, height, _] = DEFAULT_DOOR_SIZE;
            BoxTemplate::new([x, height / 2.0, z + DEFAULT_DOOR_OFFSET_Z], DEFAULT_DOOR_SIZE)
        });
        Some(door.aabb())
    }
}

/// A serializable maze level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name (for display/debugging)
    pub name: String,
    /// Player spawn position [x, y, z]
    #[serde(default = "default_spawn")]
    pub player_spawn: [f32; 3],
    /// Height of wall segments
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    /// Thickness of wall segments
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f32,
    /// Wall segments
    #[serde(default)]
    pub walls: Vec<WallSegment>,
    /// Free-standing wall blocks
    #[serde(default)]
    pub blocks: Vec<BoxTemplate>,
    /// Checkpoints in the order they are meant to be reached
    #[serde(default)]
    pub checkpoints: Vec<CheckpointTemplate>,
    /// Exit gate floor position (x, z)
    #[serde(default)]
    pub exit: Option<[f32; 2]>,
}

impl Level {
    /// Create a new empty level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player_spawn: default_spawn(),
            wall_height: DEFAULT_WALL_HEIGHT,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            walls: Vec::new(),
            blocks: Vec::new(),
            checkpoints: Vec::new(),
            exit: None,
        }
    }

    /// Load a level from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path)?;
        let level: Level = ron::from_str(&contents)?;
        level.validate()?;
        Ok(level)
    }

    /// Save a level to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Look up a built-in level by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "spiral" => Some(Self::spiral()),
            "courtyard" => Some(Self::courtyard()),
            _ => None,
        }
    }

    /// Set the player spawn position
    pub fn with_player_spawn(mut self, x: f32, y: f32, z: f32) -> Self {
        self.player_spawn = [x, y, z];
        self
    }

    /// Set the exit gate position
    pub fn with_exit(mut self, x: f32, z: f32) -> Self {
        self.exit = Some([x, z]);
        self
    }

    /// Add a wall segment
    pub fn add_wall(&mut self, from: [f32; 2], to: [f32; 2]) {
        self.walls.push(WallSegment { from, to });
    }

    /// Add a free-standing block
    pub fn add_block(&mut self, block: BoxTemplate) {
        self.blocks.push(block);
    }

    /// Add a checkpoint
    pub fn add_checkpoint(&mut self, checkpoint: CheckpointTemplate) {
        self.checkpoints.push(checkpoint);
    }

    /// Player spawn as a vector
    pub fn spawn(&self) -> Vec3 {
        self.player_spawn.into()
    }

    /// Check that every wall segment can be turned into a box
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, wall) in self.walls.iter().enumerate() {
            self.wall_box(index, wall)?;
        }
        for (index, block) in self.blocks.iter().enumerate() {
            block
                .check()
                .map_err(|reason| LevelError::InvalidBox { kind: "block", index, reason })?;
        }
        for (index, checkpoint) in self.checkpoints.iter().enumerate() {
            if let Some(door) = checkpoint.door.filter(|_| checkpoint.has_door) {
                door.check()
                    .map_err(|reason| LevelError::InvalidBox { kind: "door", index, reason })?;
            }
        }
        Ok(())
    }

    /// Boxes for all walls and blocks
    pub fn wall_boxes(&self) -> Result<Vec<Aabb>, LevelError> {
        let mut boxes = Vec::with_capacity(self.walls.len() + self.blocks.len());
        for (index, wall) in self.walls.iter().enumerate() {
            boxes.push(self.wall_box(index, wall)?);
        }
        boxes.extend(self.blocks.iter().map(BoxTemplate::aabb));
        Ok(boxes)
    }

    /// Exit gate bounds, if the level has an exit
    pub fn exit_gate(&self) -> Option<Aabb> {
        self.exit.map(|[x, z]| {
            let [_, height, _] = EXIT_GATE_SIZE;
            BoxTemplate::new([x, height / 2.0, z], EXIT_GATE_SIZE).aabb()
        })
    }

    /// Turn one segment into a box: length along the segment, thickness across it
    fn wall_box(&self, index: usize, wall: &WallSegment) -> Result<Aabb, LevelError> {
        let [x1, z1] = wall.from;
        let [x2, z2] = wall.to;
        let dx = x2 - x1;
        let dz = z2 - z1;

        if !(self.wall_height > 0.0 && self.wall_thickness > 0.0) {
            return Err(LevelError::InvalidWall { index, reason: "height and thickness must be positive" });
        }
        if dx != 0.0 && dz != 0.0 {
            return Err(LevelError::InvalidWall { index, reason: "segment is not axis-aligned" });
        }
        let length = (dx * dx + dz * dz).sqrt();
        if length == 0.0 {
            return Err(LevelError::InvalidWall { index, reason: "segment has zero length" });
        }

        let center = Vec3::new((x1 + x2) / 2.0, self.wall_height / 2.0, (z1 + z2) / 2.0);
        let size = if dx == 0.0 {
            Vec3::new(self.wall_thickness, self.wall_height, length)
        } else {
            Vec3::new(length, self.wall_height, self.wall_thickness)
        };
        Ok(Aabb::from_center_size(center, size))
    }

    /// Rectangular spiral with two checkpoints and an exit
    ///
    /// Corridors are two units wide so the player capsule fits through them.
    pub fn spiral() -> Self {
        const SEGMENTS: [[f32; 4]; 15] = [
            [-8.0, -8.0, 8.0, -8.0],
            [8.0, -8.0, 8.0, 8.0],
            [8.0, 8.0, -8.0, 8.0],
            [-8.0, 8.0, -8.0, -4.0],
            [-6.0, -4.0, 6.0, -4.0],
            [6.0, -4.0, 6.0, 6.0],
            [6.0, 6.0, -6.0, 6.0],
            [-6.0, 6.0, -6.0, 0.0],
            [-4.0, 0.0, 4.0, 0.0],
            [4.0, 0.0, 4.0, 4.0],
            [4.0, 4.0, -4.0, 4.0],
            [-4.0, 4.0, -4.0, 2.0],
            [-2.0, 2.0, 2.0, 2.0],
            [2.0, 2.0, 2.0, -2.0],
            [2.0, -2.0, -2.0, -2.0],
        ];

        let mut level = Level::new("Spiral").with_player_spawn(3.0, 1.2, 3.0).with_exit(5.2, -3.0);
        for [x1, z1, x2, z2] in SEGMENTS {
            level.add_wall([x1, z1], [x2, z2]);
        }

        level.add_checkpoint(
            CheckpointTemplate::new(3.0, 1.2, "Saving vs Spending?")
                .with_door(BoxTemplate::new([3.0, 0.9, 0.0], [1.64, 1.8, 0.18])),
        );
        level.add_checkpoint(
            CheckpointTemplate::new(3.0, -1.5, "Loans & EMI?")
                .with_door(BoxTemplate::new([4.5, 0.9, -1.91], [0.18, 1.8, 3.82])),
        );
        level
    }

    /// 11x11 courtyard of two-unit blocks with a single checkpoint
    ///
    /// The exit sits in a vestibule along the north border; the door cell is its only entrance.
    pub fn courtyard() -> Self {
        const COLS: usize = 11;
        const ROWS: usize = 11;
        const CELL: f32 = 2.0;
        const HEIGHT: f32 = 2.2;
        let half_width = COLS as f32 * CELL / 2.0;

        let cell_center = |c: usize, r: usize| {
            [
                c as f32 * CELL - half_width + CELL / 2.0,
                HEIGHT / 2.0,
                r as f32 * CELL - half_width + CELL / 2.0,
            ]
        };

        let mut level = Level::new("Courtyard").with_player_spawn(0.0, 1.6, 5.0).with_exit(0.0, -8.5);
        for r in 0..ROWS {
            for c in 0..COLS {
                if r == 0 || c == 0 || r == ROWS - 1 || c == COLS - 1 {
                    level.add_block(BoxTemplate::new(cell_center(c, r), [CELL, HEIGHT, CELL]));
                }
            }
        }
        for (c, r) in [(5, 3), (3, 5), (6, 6), (2, 8)] {
            level.add_block(BoxTemplate::new(cell_center(c, r), [CELL, HEIGHT, CELL]));
        }
        // Vestibule row, open only at the door cell
        for c in (1..COLS - 1).filter(|&c| c != COLS / 2) {
            level.add_block(BoxTemplate::new(cell_center(c, 1), [CELL, HEIGHT, CELL]));
        }

        level.add_checkpoint(
            CheckpointTemplate::new(0.0, -6.0, "Saving vs Spending?")
                .with_door(BoxTemplate::new([0.0, 1.2, -7.0], [1.8, 2.4, 0.16])),
        );
        level
    }
}

/// Error loading, saving, or validating a level
#[derive(Debug)]
pub enum LevelError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
    /// A wall segment cannot be turned into a box
    InvalidWall { index: usize, reason: &'static str },
    /// A block or checkpoint door has an unusable size
    InvalidBox { kind: &'static str, index: usize, reason: &'static str },
}

impl From<io::Error> for LevelError {
    fn from(e: io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::Parse(e)
    }
}

impl From<ron::Error> for LevelError {
    fn from(e: ron::Error) -> Self {
        LevelError::Serialize(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "IO error: {}", e),
            LevelError::Parse(e) => write!(f, "Parse error: {}", e),
            LevelError::Serialize(e) => write!(f, "Serialization error: {}", e),
            LevelError::InvalidWall { index, reason } => {
                write!(f, "Invalid wall {}: {}", index, reason)
            }
            LevelError::InvalidBox { kind, index, reason } => {
                write!(f, "Invalid {} {}: {}", kind, index, reason)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            LevelError::Parse(e) => Some(e),
            LevelError::Serialize(e) => Some(e),
            LevelError::InvalidWall { .. } | LevelError::InvalidBox { .. } => None,
        }
    }
}
