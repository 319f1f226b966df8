//! Scripted desktop and animation clock for headless runs.
//!
//! [`ScriptedDesktop`] replays a JSON scene: a screen size plus window
//! records, each optionally bounded by `appear_at` / `vanish_at` ticks so
//! windows can open and close mid-run.  [`FrameClock`] stands in for sprite
//! playback: it restarts at frame 0 whenever the requested variant changes
//! and advances one frame per presented tick.
//!
//! ```json
//! {
//!   "width": 1440, "height": 900,
//!   "windows": [
//!     { "owner": "Editor", "bounds": { "x": 100, "y": 300, "w": 800, "h": 500 },
//!       "stack_hint": 2, "vanish_at": 400 }
//!   ]
//! }
//! ```

use std::path::Path;

use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::app::events::PetFrame;
use crate::app::ports::{AnimationPort, ConfigError, WindowSource};
use crate::fsm::context::PlaybackSnapshot;
use crate::kinematics::Screen;
use crate::platform::WindowRecord;

// ───────────────────────────────────────────────────────────────
// Scene
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedWindow {
    #[serde(flatten)]
    pub record: WindowRecord,
    /// First tick the window exists (inclusive).
    #[serde(default)]
    pub appear_at: Option<u64>,
    /// First tick the window no longer exists.
    #[serde(default)]
    pub vanish_at: Option<u64>,
}

impl ScriptedWindow {
    pub fn alive_at(&self, tick: u64) -> bool {
        self.appear_at.is_none_or(|t| tick >= t) && self.vanish_at.is_none_or(|t| tick < t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub windows: Vec<ScriptedWindow>,
}

impl Scene {
    pub fn screen(&self) -> Screen {
        Screen::new(self.width, self.height)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| {
            warn!("Scene: {}", e);
            ConfigError::Corrupted
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            warn!("Scene: cannot read {}: {}", path.display(), e);
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound
            } else {
                ConfigError::Io
            }
        })?;
        Self::parse(&text)
    }
}

// ───────────────────────────────────────────────────────────────
// ScriptedDesktop (WindowSource)
// ───────────────────────────────────────────────────────────────

pub struct ScriptedDesktop {
    scene: Scene,
    tick: u64,
}

impl ScriptedDesktop {
    pub fn new(scene: Scene) -> Self {
        Self { scene, tick: 0 }
    }

    pub fn screen(&self) -> Screen {
        self.scene.screen()
    }

    /// Number of snapshots served so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

impl WindowSource for ScriptedDesktop {
    fn windows(&mut self) -> Vec<WindowRecord> {
        let tick = self.tick;
        self.tick += 1;
        self.scene
            .windows
            .iter()
            .filter(|w| w.alive_at(tick))
            .map(|w| w.record.clone())
            .collect()
    }
}

// ───────────────────────────────────────────────────────────────
// FrameClock (AnimationPort)
// ───────────────────────────────────────────────────────────────

/// Clips loop after this many frames.
pub const DEFAULT_CLIP_FRAMES: u32 = 32;

pub struct FrameClock {
    variant: u32,
    frame_index: u32,
    clip_frames: u32,
    jump_frame_size: Option<Vec2>,
    presented: u64,
    last: Option<PetFrame>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_CLIP_FRAMES, None)
    }
}

impl FrameClock {
    pub fn new(clip_frames: u32, jump_frame_size: Option<Vec2>) -> Self {
        Self {
            variant: 0,
            frame_index: 0,
            clip_frames: clip_frames.max(1),
            jump_frame_size,
            presented: 0,
            last: None,
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&PetFrame> {
        self.last.as_ref()
    }
}

impl AnimationPort for FrameClock {
    fn playback(&mut self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            variant: self.variant,
            frame_index: self.frame_index,
            jump_frame_size: self.jump_frame_size,
        }
    }

    fn present(&mut self, frame: &PetFrame) {
        if frame.variant != self.variant {
            debug!("FrameClock: playing '{}'", frame.animation_name);
            self.variant = frame.variant;
            self.frame_index = 0;
        } else {
            self.frame_index = (self.frame_index + 1) % self.clip_frames;
        }
        self.presented += 1;
        self.last = Some(frame.clone());
    }
}
