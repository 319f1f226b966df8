//! Outbound application data.
//!
//! The [`PetService`](super::service::PetService) emits [`AppEvent`]s
//! through the [`EventSink`](super::ports::EventSink) port and hands one
//! [`PetFrame`] per tick to the
//! [`AnimationPort`](super::ports::AnimationPort).

use crate::fsm::StateId;
use crate::fsm::context::AnimationKind;
use crate::geometry::Rect;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The number of active platforms changed.
    PlatformsChanged { active: usize, total: usize },

    /// The pet was dropped at a new position by a reset.
    PositionReset { x: f32, y: f32 },

    /// The overlay was shown or hidden.
    VisibilityChanged(bool),
}

/// Everything the presentation layer needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PetFrame {
    pub state: StateId,
    pub animation: AnimationKind,
    /// Animation name from the configured name table.
    pub animation_name: String,
    /// Changes whenever playback must restart.
    pub variant: u32,
    pub flipped: bool,
    pub rect: Rect,
    pub visible: bool,
}
