//! Shared mutable context threaded through every state handler.
//!
//! `PetContext` is the blackboard the state handlers read from and write
//! to: the body, this tick's active platforms and the platform underfoot,
//! animation playback read-back and the animation command for the
//! presentation layer, configuration, and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::PetConfig;
use crate::kinematics::{CollisionResult, Kinematics, PetBody, Screen};
use crate::platform::Platform;

// ---------------------------------------------------------------------------
// Animation (written by state handlers; consumed by presentation)
// ---------------------------------------------------------------------------

/// Animations the core asks for.  Names come from the config name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Idle,
    Run,
    Fall,
    Jump,
}

/// What the presentation layer should be playing.
///
/// `variant` changes on every switch and on every idle re-roll; the
/// presentation layer restarts playback (and picks a new clip for the same
/// animation) whenever it sees a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCommand {
    pub kind: AnimationKind,
    pub variant: u32,
}

impl Default for AnimationCommand {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Idle,
            variant: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Playback read-back (written by the service before each tick)
// ---------------------------------------------------------------------------

/// What the animation collaborator is actually showing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackSnapshot {
    /// The command variant the playback belongs to.
    pub variant: u32,
    /// Current frame index within that playback.
    pub frame_index: u32,
    /// Native frame size of the jump animation, if known.
    pub jump_frame_size: Option<Vec2>,
}

// ---------------------------------------------------------------------------
// PetContext
// ---------------------------------------------------------------------------

pub struct PetContext {
    // -- Timing --
    /// Duration of one tick in seconds.
    pub tick_period_secs: f32,

    // -- World --
    pub body: PetBody,
    /// Active platforms for this tick, front to back.  Replaced wholesale by
    /// the service each tick; handlers only read it.
    pub platforms: Vec<Platform>,
    /// The platform the pet last landed on, if it is standing on one.
    pub support: Option<Platform>,
    pub kinematics: Kinematics,

    // -- Animation --
    pub animation: AnimationCommand,
    pub playback: PlaybackSnapshot,

    // -- Configuration --
    pub config: PetConfig,

    pub rng: SmallRng,
}

impl PetContext {
    /// Create a context with the body at `position`.
    pub fn new(config: PetConfig, screen: Screen, position: Vec2) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::with_rng(config, screen, position, rng)
    }

    pub fn with_rng(config: PetConfig, screen: Screen, position: Vec2, rng: SmallRng) -> Self {
        let size = Vec2::new(config.character_width, config.character_height);
        let kinematics = Kinematics::new(screen, config.fall_speed, config.velocity_damping);
        Self {
            tick_period_secs: config.tick_secs(),
            body: PetBody::new(position, size),
            platforms: Vec::new(),
            support: None,
            kinematics,
            animation: AnimationCommand::default(),
            playback: PlaybackSnapshot::default(),
            config,
            rng,
        }
    }

    pub fn tick_ms(&self) -> f32 {
        self.tick_period_secs * 1000.0
    }

    pub fn screen(&self) -> Screen {
        self.kinematics.screen
    }

    /// Run one kinematics step with the given horizontal intent and record
    /// the supporting platform on the context.
    pub fn step_body(&mut self, intent_x: f32) -> CollisionResult {
        let hit = self.kinematics.step(
            &mut self.body,
            &self.platforms,
            intent_x,
            self.tick_period_secs,
        );
        self.support = hit.support.and_then(|i| self.platforms.get(i).cloned());
        hit
    }

    /// Switch the displayed animation.  No-op if it is already playing.
    pub fn play(&mut self, kind: AnimationKind) {
        if self.animation.kind != kind {
            self.animation.kind = kind;
            self.animation.variant = self.animation.variant.wrapping_add(1);
        }
    }

    /// Restart the current animation with a freshly picked clip.
    pub fn reroll_animation(&mut self) {
        self.animation.variant = self.animation.variant.wrapping_add(1);
    }

    /// Name of the requested animation in the collaborator's vocabulary.
    pub fn animation_name(&self) -> &str {
        let names = &self.config.animations;
        match self.animation.kind {
            AnimationKind::Idle => &names.idle,
            AnimationKind::Run => &names.run,
            AnimationKind::Fall => &names.fall,
            AnimationKind::Jump => &names.jump,
        }
    }

    /// Jump sprite size: what playback reports, else the configured fallback.
    pub fn jump_size(&self) -> Vec2 {
        self.playback
            .jump_frame_size
            .filter(|s| s.x > 0.0 && s.y > 0.0)
            .unwrap_or(Vec2::new(self.config.jump_width, self.config.jump_height))
    }

    /// Is `platform` among this tick's active platforms?
    pub fn is_active(&self, platform: &Platform) -> bool {
        self.platforms.iter().any(|p| p.same_window(platform))
    }
}
