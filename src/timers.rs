//! Tick-driven timers.
//!
//! Behaviour timers (idle animation refresh, idle wander, move-target
//! validation) are plain countdown fields advanced by the owning state's
//! `update()` with the tick duration.  No event loop, no callbacks: a timer
//! "fires" by returning `true` from `tick`.
//!
//! ```text
//!  Countdown      armed ──tick──▶ … ──tick──▶ fired (disarmed)
//!  IntervalTimer  running ──period──▶ fire ──period──▶ fire …
//! ```

use rand::Rng;

// ═══════════════════════════════════════════════════════════════
//  One-shot countdown
// ═══════════════════════════════════════════════════════════════

/// Fires once after the armed duration, then disarms itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining_ms: Option<f32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm to fire after `ms` milliseconds.
    pub fn arm(&mut self, ms: f32) {
        self.remaining_ms = Some(ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<f32> {
        self.remaining_ms
    }

    /// Advance by `dt_ms`.  Returns `true` on the tick the countdown expires.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        match self.remaining_ms {
            Some(remaining) if remaining - dt_ms <= 0.0 => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - dt_ms);
                false
            }
            None => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Recurring interval
// ═══════════════════════════════════════════════════════════════

/// Fires every `period_ms` while running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalTimer {
    period_ms: f32,
    elapsed_ms: f32,
    running: bool,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, period_ms: f32) {
        self.period_ms = period_ms;
        self.elapsed_ms = 0.0;
        self.running = period_ms > 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt_ms`.  Returns `true` if at least one period elapsed;
    /// a tick longer than several periods still fires only once.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms %= self.period_ms;
            true
        } else {
            false
        }
    }
}

/// `base_ms` shifted by a uniform offset in `[-jitter_ms, +jitter_ms]`,
/// never below zero.
pub fn jittered(rng: &mut impl Rng, base_ms: u32, jitter_ms: u32) -> f32 {
    let jitter = jitter_ms as f32;
    let offset = if jitter > 0.0 {
        rng.random_range(-jitter..=jitter)
    } else {
        0.0
    };
    (base_ms as f32 + offset).max(0.0)
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
