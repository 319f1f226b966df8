//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetService (domain)
//! ```
//!
//! Driven adapters (window enumeration, sprite playback, event sinks,
//! settings) implement these traits.  The
//! [`PetService`](super::service::PetService) consumes them via generics,
//! so the domain core never touches the desktop directly.

use crate::config::PetConfig;
use crate::fsm::context::PlaybackSnapshot;
use crate::platform::WindowRecord;

use super::events::{AppEvent, PetFrame};

// ───────────────────────────────────────────────────────────────
// Window source (driven adapter: desktop → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the raw, unordered window list for this tick.
pub trait WindowSource {
    fn windows(&mut self) -> Vec<WindowRecord>;
}

// ───────────────────────────────────────────────────────────────
// Animation port (driven adapter: domain ↔ sprite playback)
// ───────────────────────────────────────────────────────────────

/// Sprite playback and presentation.
pub trait AnimationPort {
    /// What is currently playing.  Read once per tick before the state
    /// machine runs.
    fn playback(&mut self) -> PlaybackSnapshot;

    /// Receive this tick's output.
    fn present(&mut self, frame: &PetFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: settings → domain)
// ───────────────────────────────────────────────────────────────

/// Loads configuration.  Nothing is ever written back.
///
/// Implementations validate what they load and report
/// [`ConfigError::ValidationFailed`] instead of clamping.
pub trait ConfigPort {
    /// Returns [`PetConfig::default()`] if no settings exist.
    fn load(&self) -> Result<PetConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No settings found where they were required.
    NotFound,
    /// Settings failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Settings could not be read.
    Io,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
