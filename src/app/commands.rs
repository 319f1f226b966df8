//! Inbound commands to the application service.
//!
//! Named signals from the [`EventBus`](crate::events::EventBus) map onto
//! these; tests and embedding code may also send them directly through
//! [`PetService::handle_command`](super::service::PetService::handle_command).

use crate::config::PetConfig;
use crate::events::Signal;
use crate::fsm::StateId;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum PetCommand {
    /// Drop the pet at a random spot in the top half of the screen.
    ResetPosition,

    /// Play the custom trigger: jump, whatever the pet is doing.
    TriggerCustom,

    /// Show or hide the overlay.  Simulation keeps running while hidden.
    SetVisible(bool),

    /// Force the FSM into a specific state (debug / testing only).
    ForceState(StateId),

    /// Hot-swap configuration.
    UpdateConfig(PetConfig),
}

impl From<Signal> for PetCommand {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Reset => Self::ResetPosition,
            Signal::Custom => Self::TriggerCustom,
            Signal::Hide => Self::SetVisible(false),
            Signal::Show => Self::SetVisible(true),
        }
    }
}
