//! # Forward Collision Guard
//!
//! Stops the viewer walking through walls and artworks. Every frame the
//! guard casts a ray from the active camera along its forward vector against
//! a cached set of collidable nodes and arbitrates the movement controller:
//!
//! 1. **Cache**: nodes tagged collidable are re-queried periodically, not per
//!    frame; an empty cache forces an immediate refresh
//! 2. **Cast**: nearest hit wins, descending recursively into children
//! 3. **Arbitrate**: inside the distance threshold the movement controller is
//!    suspended, otherwise released
//!
//! The guard is level-triggered: the suspend/release side effect is
//! re-applied on every evaluated frame, so re-entering a state is harmless.

use std::time::{Duration, Instant};

use cgmath::Vector3;
use log::debug;

use crate::movement::{ControlStrategy, MovementControl};
use crate::scene::{raycast, Ray, NodeId, Scene};

/// Tag that marks a node as an obstacle for the guard's ray test.
pub const COLLIDABLE_TAG: &str = "collidable";

/// Collision guard configuration.
///
/// The defaults are hand-tuned gallery values; both the distance threshold
/// and the cache refresh rules are deliberately configuration, not
/// invariants.
#[derive(Debug, Clone)]
pub struct CollisionGuardConfig {
    /// Distance below which the viewer counts as blocked, in scene units
    pub collision_distance: f32,
    /// How long a collidable snapshot stays fresh
    pub refresh_interval: Duration,
    /// Tag queried when rebuilding the snapshot
    pub collidable_tag: String,
}

impl Default for CollisionGuardConfig {
    fn default() -> Self {
        Self {
            collision_distance: 1.0,
            refresh_interval: Duration::from_millis(1000),
            collidable_tag: COLLIDABLE_TAG.to_string(),
        }
    }
}

/// Movement arbitration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Movement controller enabled
    Clear,
    /// An obstacle is inside the collision distance; movement suspended
    Blocked,
}

/// Per-frame forward collision guard for the viewer rig.
pub struct CollisionGuard {
    config: CollisionGuardConfig,
    state: GuardState,
    collidables: Vec<NodeId>,
    last_refresh: Option<Instant>,
    strategy: Option<ControlStrategy>,
    strategy_chosen: bool,
}

impl CollisionGuard {
    pub fn new(config: CollisionGuardConfig) -> Self {
        Self {
            config,
            state: GuardState::Clear,
            collidables: Vec::new(),
            last_refresh: None,
            strategy: None,
            strategy_chosen: false,
        }
    }

    pub fn config(&self) -> &CollisionGuardConfig {
        &self.config
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Number of nodes in the current collidable snapshot.
    pub fn collidable_count(&self) -> usize {
        self.collidables.len()
    }

    /// Evaluates one frame against the wall clock.
    pub fn tick(&mut self, scene: &Scene, control: Option<&mut dyn MovementControl>) {
        self.tick_at(Instant::now(), scene, control);
    }

    /// Evaluates one frame at an explicit instant.
    ///
    /// If the active camera or the movement controller is unavailable the
    /// frame is skipped outright: no cache refresh, no transition. The
    /// control strategy is chosen from the controller's capabilities on the
    /// first evaluated frame and kept thereafter.
    pub fn tick_at(
        &mut self,
        now: Instant,
        scene: &Scene,
        control: Option<&mut dyn MovementControl>,
    ) {
        let Some(camera) = scene.active_camera() else {
            return;
        };
        let Some(control) = control else {
            return;
        };

        if !self.strategy_chosen {
            self.strategy = ControlStrategy::select(control.capabilities());
            self.strategy_chosen = true;
        }

        // An empty snapshot self-heals immediately; otherwise it is only
        // rebuilt once the refresh interval has passed
        let expired = self
            .last_refresh
            .map_or(true, |at| now.duration_since(at) > self.config.refresh_interval);
        if self.collidables.is_empty() || expired {
            self.refresh_collidables(scene, now);
        }

        let Some(origin) = scene.world_position(camera) else {
            return;
        };
        let Some(rotation) = scene.world_rotation(camera) else {
            return;
        };
        let forward = rotation * -Vector3::unit_z();

        let ray = Ray::new(origin, forward);
        let hits = raycast(scene, &ray, &self.collidables, true);
        let blocked = hits
            .first()
            .map_or(false, |hit| hit.distance < self.config.collision_distance);

        let next = if blocked {
            GuardState::Blocked
        } else {
            GuardState::Clear
        };
        if next != self.state {
            debug!("collision guard: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.apply(control);
    }

    /// Rebuilds the collidable snapshot from the live scene.
    pub fn refresh_collidables(&mut self, scene: &Scene, now: Instant) {
        self.collidables = scene.nodes_with_tag(&self.config.collidable_tag);
        self.last_refresh = Some(now);
    }

    fn apply(&self, control: &mut dyn MovementControl) {
        let Some(strategy) = self.strategy else {
            return;
        };
        match (self.state, strategy) {
            (GuardState::Blocked, ControlStrategy::PauseResume) => control.pause(),
            (GuardState::Blocked, ControlStrategy::EnabledFlag) => {
                control.zero_velocity();
                control.set_enabled(false);
            }
            (GuardState::Blocked, ControlStrategy::VelocityOnly) => control.zero_velocity(),
            (GuardState::Clear, ControlStrategy::PauseResume) => control.resume(),
            (GuardState::Clear, ControlStrategy::EnabledFlag) => control.set_enabled(true),
            (GuardState::Clear, ControlStrategy::VelocityOnly) => {}
        }
    }
}

impl Default for CollisionGuard {
    fn default() -> Self {
        Self::new(CollisionGuardConfig::default())
    }
}
