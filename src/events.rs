//! Named-signal event bus.
//!
//! User commands (menu, tray, hotkeys) reach the pet as named signals.
//! The bus is an explicit object owned by whoever drives the tick loop and
//! lent by `&mut` to publishers and to the service; there is no global
//! registry.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ Menu / tray │────▶│              │     │                  │
//! │ Hotkeys     │────▶│   EventBus   │────▶│ PetService.tick  │
//! │ Scripts     │────▶│  (FIFO, 16)  │     │ (drains at start)│
//! └─────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! The service drains the bus at the top of each tick, so a signal published
//! while a tick is in flight is handled before the next state update.

use heapless::Deque;
use log::warn;

/// Maximum number of pending signals.
pub const SIGNAL_QUEUE_CAP: usize = 16;

/// Signals the pet reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Re-randomize the pet's position.
    Reset,
    /// Play the custom trigger (forces a jump).
    Custom,
    /// Hide the overlay.
    Hide,
    /// Show the overlay.
    Show,
}

impl Signal {
    pub const ALL: [Signal; 4] = [Signal::Reset, Signal::Custom, Signal::Hide, Signal::Show];

    /// Wire name of the signal.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Custom => "custom",
            Self::Hide => "hide",
            Self::Show => "show",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Bounded FIFO of pending signals.
#[derive(Debug)]
pub struct EventBus {
    queue: Deque<Signal, SIGNAL_QUEUE_CAP>,
    dropped: u32,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue a signal.  Returns `false` if the queue is full (signal dropped).
    pub fn publish(&mut self, signal: Signal) -> bool {
        if self.queue.push_back(signal).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!("EventBus: queue full, dropping '{}'", signal.name());
            return false;
        }
        true
    }

    /// Queue a signal by name.  Unknown names are rejected.
    pub fn publish_named(&mut self, name: &str) -> bool {
        match Signal::from_name(name) {
            Some(signal) => self.publish(signal),
            None => {
                warn!("EventBus: unknown signal '{}'", name);
                false
            }
        }
    }

    /// Hand every pending signal to `handler`, oldest first.
    pub fn drain(&mut self, mut handler: impl FnMut(Signal)) {
        while let Some(signal) = self.queue.pop_front() {
            handler(signal);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Signals lost to a full queue since creation.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
