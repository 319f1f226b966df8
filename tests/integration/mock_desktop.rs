//! Mock desktop adapters for integration tests.
//!
//! The desktop is a plain window list tests mutate between ticks; the
//! sink records every event so tests can assert on the full history.

use windowpet::app::events::AppEvent;
use windowpet::app::ports::{EventSink, WindowSource};
use windowpet::geometry::Rect;
use windowpet::platform::WindowRecord;

// ── MockDesktop ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDesktop {
    pub windows: Vec<WindowRecord>,
    pub polls: u64,
}

#[allow(dead_code)]
impl MockDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, owner: &str, rect: Rect, stack: i64) -> Self {
        self.windows.push(WindowRecord::new(owner, rect, stack));
        self
    }

    pub fn remove(&mut self, owner: &str) {
        self.windows
            .retain(|w| w.owner.as_deref() != Some(owner));
    }
}

impl WindowSource for MockDesktop {
    fn windows(&mut self) -> Vec<WindowRecord> {
        self.polls += 1;
        self.windows.clone()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn position_resets(&self) -> Vec<(f32, f32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PositionReset { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
