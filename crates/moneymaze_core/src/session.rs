//! Game session
//!
//! The session owns everything a single play-through mutates: the player body and camera,
//! the obstacle set, checkpoints with their doors, score, timers, and pending events.
//! The caller feeds it input through a [`MovementController`] once per frame and drains
//! [`GameEvent`]s afterwards.

use moneymaze_input::{CameraPose, MovementController, DEFAULT_PITCH_LIMIT_DEGREES};
use moneymaze_math::Vec3;
use moneymaze_physics::{
    HeadBob, MovementConfig, MovementModel, Obstacle, ObstacleSet, PlayerBody, StepOutcome,
    DEFAULT_EYE_HEIGHT,
};

use crate::checkpoint::{Checkpoint, CheckpointState, ProximityConfig};
use crate::door::{Door, DoorTiming};
use crate::events::{CheckpointId, Choice, DoorId, EventQueue, GameEvent};
use crate::level::{Level, LevelError};
use crate::score::{Score, ScoreRules};
use crate::timers::{TimedAction, Timers};

/// Seconds after a choice before its feedback is cleared
pub const DEFAULT_FEEDBACK_DELAY: f32 = 1.2;

/// Everything that tunes a session
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub movement: MovementConfig,
    pub proximity: ProximityConfig,
    pub doors: DoorTiming,
    pub score: ScoreRules,
    /// Seconds after a choice before its feedback is cleared
    pub feedback_delay: f32,
    /// Resting eye height above the player position (capsule model)
    pub eye_height: f32,
    pub pitch_limit_degrees: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            proximity: ProximityConfig::default(),
            doors: DoorTiming::default(),
            score: ScoreRules::default(),
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            eye_height: DEFAULT_EYE_HEIGHT,
            pitch_limit_degrees: DEFAULT_PITCH_LIMIT_DEGREES,
        }
    }
}

/// Coarse session state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Paused,
    /// Exit reached; no further movement or checkpoint changes
    Completed,
}

/// A single play-through of a level
pub struct GameSession {
    config: SessionConfig,
    level_name: String,
    phase: SessionPhase,
    engaged: bool,

    player: PlayerBody,
    camera: CameraPose,
    head_bob: HeadBob,
    eye_offset: f32,

    obstacles: ObstacleSet,
    checkpoints: Vec<Checkpoint>,
    doors: Vec<Door>,
    exit: Option<Vec3>,
    current: Option<CheckpointId>,

    score: Score,
    timers: Timers,
    events: EventQueue,
    last_step: StepOutcome,
}

impl GameSession {
    /// Build a session from a level template
    pub fn new(level: &Level, config: SessionConfig) -> Result<Self, SessionError> {
        level.validate()?;
        let mut obstacles = ObstacleSet::new();
        for (i, aabb) in level.wall_boxes()?.into_iter().enumerate() {
            obstacles.insert(Obstacle::wall(aabb).with_label(format!("wall {}", i)));
        }

        let mut doors = Vec::new();
        let mut checkpoints = Vec::with_capacity(level.checkpoints.len());
        for (i, template) in level.checkpoints.iter().enumerate() {
            let door = template.door_box().map(|aabb| {
                let key = obstacles.insert(Obstacle::door(aabb).with_label(format!("door {}", i)));
                doors.push(Door::new(key));
                DoorId(doors.len() - 1)
            });
            let [x, z] = template.position;
            checkpoints.push(Checkpoint::new(x, z, template.question.clone(), door));
        }

        let exit = level.exit_gate().map(|gate| gate.center());

        if config.movement.model == MovementModel::Direct {
            for (key, obstacle) in obstacles.degenerate_for_radius(config.movement.test_radius) {
                log::warn!(
                    "Obstacle {:?} ({}) is thinner than twice the test radius {} and will not block",
                    key,
                    obstacle.label,
                    config.movement.test_radius
                );
            }
        }

        let head_bob = HeadBob::default().with_base_height(config.eye_height);

        log::info!(
            "Session started on '{}': {} obstacles, {} checkpoints, {} model",
            level.name,
            obstacles.len(),
            checkpoints.len(),
            match config.movement.model {
                MovementModel::Capsule => "capsule",
                MovementModel::Direct => "direct",
            }
        );

        Ok(Self {
            level_name: level.name.clone(),
            phase: SessionPhase::Running,
            engaged: false,
            player: PlayerBody::new(level.spawn()).with_capsule(config.movement.capsule),
            camera: CameraPose::new(config.pitch_limit_degrees),
            head_bob,
            eye_offset: config.eye_height,
            obstacles,
            checkpoints,
            doors,
            exit,
            current: None,
            score: Score::new(config.score),
            timers: Timers::new(),
            events: EventQueue::new(),
            last_step: StepOutcome::default(),
            config,
        })
    }

    /// Advance the session by one frame
    pub fn update(&mut self, dt: f32, controller: &mut MovementController) {
        // Timers run regardless of phase
        for action in self.timers.advance(dt) {
            self.fire(action);
        }
        for door in &mut self.doors {
            door.advance(dt);
        }

        if self.phase != SessionPhase::Running || !self.engaged {
            controller.discard_look();
            self.last_step = StepOutcome::default();
            if self.config.movement.model == MovementModel::Capsule {
                self.eye_offset = self.head_bob.update(Vec3::ZERO, dt);
            }
            if self.phase == SessionPhase::Running {
                self.update_proximity();
            }
            return;
        }

        controller.apply_look(&mut self.camera);

        let intent = if self.is_choosing() {
            Vec3::ZERO
        } else {
            self.camera.to_world(controller.intent())
        };

        self.last_step = if self.is_choosing() {
            StepOutcome::default()
        } else {
            self.player.step(intent, dt, &self.config.movement, &self.obstacles)
        };
        if self.config.movement.model == MovementModel::Capsule {
            self.eye_offset = self.head_bob.update(intent, dt);
        }

        self.update_proximity();
        self.check_exit();
    }

    /// Interact with the armed checkpoint, opening its decision
    ///
    /// Returns false if no checkpoint is armed.
    pub fn interact(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        let Some(id) = self.current else {
            log::debug!("Interact with no armed checkpoint");
            return false;
        };
        let checkpoint = &mut self.checkpoints[id.0];
        if !checkpoint.begin_choice() {
            return false;
        }
        self.player.halt();
        self.events.push(GameEvent::DecisionRequested {
            checkpoint: id,
            question: checkpoint.question().to_string(),
        });
        true
    }

    /// Answer the armed (or open) checkpoint
    ///
    /// Returns false if no checkpoint is waiting for an answer.
    pub fn choose(&mut self, choice: Choice) -> bool {
        match self.current {
            Some(id) => self.resolve(id, choice),
            None => {
                log::debug!("Choice {} with no armed checkpoint", choice);
                false
            }
        }
    }

    /// Answer a specific checkpoint, e.g. from a click on its decision panel
    pub fn choose_at(&mut self, checkpoint: CheckpointId, choice: Choice) -> Result<bool, SessionError> {
        if checkpoint.0 >= self.checkpoints.len() {
            return Err(SessionError::NoSuchCheckpoint(checkpoint));
        }
        Ok(self.resolve(checkpoint, choice))
    }

    fn resolve(&mut self, id: CheckpointId, choice: Choice) -> bool {
        if self.phase == SessionPhase::Completed {
            return false;
        }
        let checkpoint = &mut self.checkpoints[id.0];
        if !checkpoint.resolve(choice) {
            return false;
        }
        let door = checkpoint.door();
        if self.current == Some(id) {
            self.current = None;
        }

        self.events.push(GameEvent::ChoiceMade { checkpoint: id, choice });

        let delta = self.score.apply(choice);
        log::info!("Checkpoint {} answered {}: score {:+} -> {}", id.0, choice, delta, self.score.value());
        self.events.push(GameEvent::ScoreChanged {
            delta,
            score: self.score.value(),
        });

        match (door, choice) {
            (Some(door), Choice::Good) => self.open_door(door),
            (Some(door), Choice::Bad) => self.block_door(door),
            (None, _) => {}
        }

        self.timers.schedule(self.config.feedback_delay, TimedAction::ClearFeedback(id));
        true
    }

    fn open_door(&mut self, id: DoorId) {
        let Some(door) = self.doors.get_mut(id.0) else {
            log::debug!("Open of missing door {:?}", id);
            return;
        };
        if door.open() {
            log::info!("Door {} opening", id.0);
            self.events.push(GameEvent::DoorOpening { door: id });
            self.timers.schedule(self.config.doors.open_delay, TimedAction::RemoveDoor(id));
        }
    }

    fn block_door(&mut self, id: DoorId) {
        let Some(door) = self.doors.get_mut(id.0) else {
            log::debug!("Block of missing door {:?}", id);
            return;
        };
        if door.block() {
            log::info!("Door {} blocked", id.0);
            self.events.push(GameEvent::DoorBlocked { door: id });
            self.timers.schedule(self.config.doors.flash_duration, TimedAction::EndFlash(id));
        }
    }

    fn fire(&mut self, action: TimedAction) {
        match action {
            TimedAction::RemoveDoor(id) => {
                if let Some(door) = self.doors.get_mut(id.0) {
                    if door.remove(&mut self.obstacles) {
                        log::info!("Door {} removed", id.0);
                        self.events.push(GameEvent::DoorRemoved { door: id });
                    }
                }
            }
            TimedAction::EndFlash(id) => {
                if let Some(door) = self.doors.get_mut(id.0) {
                    if door.end_flash() {
                        self.events.push(GameEvent::DoorFlashEnded { door: id });
                    }
                }
            }
            TimedAction::ClearFeedback(checkpoint) => {
                self.events.push(GameEvent::FeedbackCleared { checkpoint });
            }
        }
    }

    fn update_proximity(&mut self) {
        let position = self.player.position;
        let proximity = self.config.proximity;

        match self.current {
            Some(id) => {
                let checkpoint = &mut self.checkpoints[id.0];
                if checkpoint.state() == CheckpointState::Armed
                    && checkpoint.distance_to(position) > proximity.disarm_radius
                {
                    checkpoint.disarm();
                    self.current = None;
                    self.events.push(GameEvent::CheckpointDisarmed { checkpoint: id });
                }
            }
            None => {
                let armed = self.checkpoints.iter_mut().enumerate().find(|(_, cp)| {
                    cp.state() == CheckpointState::Inactive
                        && cp.distance_to(position) < proximity.arm_radius
                });
                if let Some((index, checkpoint)) = armed {
                    checkpoint.arm();
                    let id = CheckpointId(index);
                    self.current = Some(id);
                    self.events.push(GameEvent::CheckpointArmed {
                        checkpoint: id,
                        question: checkpoint.question().to_string(),
                    });
                }
            }
        }
    }

    fn check_exit(&mut self) {
        let Some(exit) = self.exit else {
            return;
        };
        if self.player.position.distance(exit) < self.config.proximity.exit_radius {
            self.phase = SessionPhase::Completed;
            log::info!("Exit reached with score {}", self.score.value());
            self.events.push(GameEvent::ExitReached {
                score: self.score.value(),
            });
        }
    }

    /// Engage mouse-look and movement (pointer lock acquired)
    pub fn engage(&mut self) {
        if !self.engaged {
            self.engaged = true;
            self.events.push(GameEvent::PointerEngaged);
        }
    }

    /// Release mouse-look and movement (pointer lock lost)
    pub fn disengage(&mut self) {
        if self.engaged {
            self.engaged = false;
            self.player.halt();
            self.events.push(GameEvent::PointerReleased);
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
            self.events.push(GameEvent::Paused);
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Running;
            self.events.push(GameEvent::Resumed);
            true
        } else {
            false
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Move the player without simulating (spawn fix-ups, tests)
    pub fn teleport(&mut self, position: Vec3) {
        self.player.position = position;
        self.player.halt();
    }

    /// Camera position: the player position plus the bobbing eye offset
    ///
    /// For the direct model the position already is the eye and there is no bob.
    pub fn eye_position(&self) -> Vec3 {
        match self.config.movement.model {
            MovementModel::Capsule => self.player.position + Vec3::new(0.0, self.eye_offset, 0.0),
            // The direct model moves the camera itself
            MovementModel::Direct => self.player.position,
        }
    }

    /// Current vertical lift of a door for presentation
    pub fn door_lift(&self, door: DoorId) -> Option<f32> {
        self.doors.get(door.0).map(|d| d.lift(&self.config.doors))
    }

    /// Whether a decision is open and movement is frozen
    pub fn is_choosing(&self) -> bool {
        self.current
            .map(|id| self.checkpoints[id.0].state() == CheckpointState::Choosing)
            .unwrap_or(false)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn checkpoint(&self, id: CheckpointId) -> Result<&Checkpoint, SessionError> {
        self.checkpoints.get(id.0).ok_or(SessionError::NoSuchCheckpoint(id))
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn current_checkpoint(&self) -> Option<CheckpointId> {
        self.current
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Outcome of the most recent movement step
    pub fn last_step(&self) -> &StepOutcome {
        &self.last_step
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seconds of simulated time since the session started
    pub fn elapsed(&self) -> f64 {
        self.timers.now()
    }
}

/// Error building or addressing a session
#[derive(Debug)]
pub enum SessionError {
    /// The level geometry is invalid
    Level(LevelError),
    /// Checkpoint handle out of range
    NoSuchCheckpoint(CheckpointId),
}

impl From<LevelError> for SessionError {
    fn from(e: LevelError) -> Self {
        SessionError::Level(e)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Level(e) => write!(f, "Level error: {}", e),
            SessionError::NoSuchCheckpoint(id) => write!(f, "No checkpoint with index {}", id.index()),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Level(e) => Some(e),
            SessionError::NoSuchCheckpoint(_) => None,
        }
    }
}
