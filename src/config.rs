//! Engine configuration parameters
//!
//! All tunable parameters for the pet engine.  Values come from an external
//! settings file (see [`ConfigPort`](crate::app::ports::ConfigPort)); every
//! field has a default so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Names the animation collaborator knows each animation by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationNames {
    pub idle: String,
    pub run: String,
    pub fall: String,
    pub jump: String,
}

impl Default for AnimationNames {
    fn default() -> Self {
        Self {
            idle: "idle".into(),
            run: "run".into(),
            fall: "fall".into(),
            jump: "jump".into(),
        }
    }
}

/// Core engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // --- Timing ---
    /// Simulation ticks per second
    pub fps: u32,

    // --- Body ---
    /// Default bounding box width (px)
    pub character_width: f32,
    /// Default bounding box height (px)
    pub character_height: f32,
    /// Jump sprite size used when the animation layer reports none
    pub jump_width: f32,
    pub jump_height: f32,

    // --- Platforms ---
    /// Windows narrower than this are not platforms
    pub min_window_width: f32,
    /// Windows shorter than this are not platforms
    pub min_window_height: f32,
    /// Owners whose windows are always active and never occlude (dock, taskbar)
    pub mandatory_owners: Vec<String>,
    /// Owners whose windows are never platforms
    pub illegal_owners: Vec<String>,
    /// Owner name of the pet's own overlay window
    pub overlay_owner: String,

    // --- Physics ---
    /// Constant fall speed (px/s)
    pub fall_speed: f32,
    /// Walking speed toward a move target (px/s)
    pub move_speed: f32,
    /// Per-tick velocity decay factor
    pub velocity_damping: f32,

    // --- Behaviour ---
    /// Idle animation re-roll period and jitter (ms)
    pub idle_refresh_ms: u32,
    pub idle_refresh_jitter_ms: u32,
    /// Idle wander period and jitter (ms)
    pub wander_ms: u32,
    pub wander_jitter_ms: u32,
    /// How often a move target is re-validated (ms)
    pub target_check_ms: u32,
    /// Horizontal distance at which a move target counts as reached (px)
    pub arrive_distance: f32,
    /// Jump animation frame after which the jump is over
    pub jump_end_frame: u32,

    /// Animation name table
    pub animations: AnimationNames,

    // --- Diagnostics ---
    /// Log the active platform list every tick
    pub debug: bool,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            fps: 16,

            character_width: 100.0,
            character_height: 100.0,
            jump_width: 128.0,
            jump_height: 128.0,

            min_window_width: 100.0,
            min_window_height: 100.0,
            mandatory_owners: vec!["Dock".into(), "Taskbar".into()],
            illegal_owners: vec![
                "Window Server".into(),
                "Control Centre".into(),
                "Notification Center".into(),
                "Spotlight".into(),
            ],
            overlay_owner: "windowpet".into(),

            fall_speed: 480.0,
            move_speed: 160.0,
            velocity_damping: 0.7,

            idle_refresh_ms: 3000,
            idle_refresh_jitter_ms: 1000,
            wander_ms: 8000,
            wander_jitter_ms: 2500,
            target_check_ms: 200,
            arrive_distance: 10.0,
            jump_end_frame: 24,

            animations: AnimationNames::default(),

            debug: false,
            seed: None,
        }
    }
}

impl PetConfig {
    /// Duration of one tick in seconds.
    pub fn tick_secs(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Duration of one tick in milliseconds.
    pub fn tick_ms(&self) -> f32 {
        1000.0 / self.fps.max(1) as f32
    }

    /// Range-check every field.  Rejects rather than clamps; NaN fails
    /// every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=240).contains(&self.fps) {
            return Err(ConfigError::ValidationFailed("fps must be 1–240"));
        }
        if !(self.character_width > 0.0 && self.character_height > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "character size must be positive",
            ));
        }
        if !(self.jump_width > 0.0 && self.jump_height > 0.0) {
            return Err(ConfigError::ValidationFailed("jump size must be positive"));
        }
        if !(self.min_window_width >= 0.0 && self.min_window_height >= 0.0) {
            return Err(ConfigError::ValidationFailed(
                "minimum window size must not be negative",
            ));
        }
        if !(self.fall_speed > 0.0) {
            return Err(ConfigError::ValidationFailed("fall_speed must be positive"));
        }
        if !(self.move_speed > 0.0) {
            return Err(ConfigError::ValidationFailed("move_speed must be positive"));
        }
        if !(self.velocity_damping > 0.0 && self.velocity_damping <= 1.0) {
            return Err(ConfigError::ValidationFailed(
                "velocity_damping must be in (0, 1]",
            ));
        }
        if !(self.arrive_distance > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "arrive_distance must be positive",
            ));
        }
        // A single step wider than the arrival window would oscillate around
        // the target forever.
        if self.move_speed * self.tick_secs() >= 2.0 * self.arrive_distance {
            return Err(ConfigError::ValidationFailed(
                "move_speed too high for arrive_distance at this fps",
            ));
        }
        if self.target_check_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "target_check_ms must be non-zero",
            ));
        }
        if self.idle_refresh_jitter_ms > self.idle_refresh_ms
            || self.wander_jitter_ms > self.wander_ms
        {
            return Err(ConfigError::ValidationFailed(
                "timer jitter must not exceed its period",
            ));
        }
        Ok(())
    }
}
