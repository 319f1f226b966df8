//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  The binary routes that through `tracing-subscriber`.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::PlatformsChanged { active, total } => {
                info!("PLATFORMS | active={} candidates={}", active, total);
            }
            AppEvent::PositionReset { x, y } => {
                info!("RESET | dropped at ({:.0}, {:.0})", x, y);
            }
            AppEvent::VisibilityChanged(visible) => {
                info!("VISIBLE | {}", if *visible { "shown" } else { "hidden" });
            }
        }
    }
}
