//! Application service, the hexagonal core.
//!
//! [`PetService`] owns the FSM, the shared context and the platform
//! filter.  All I/O flows through port traits injected at call sites, so
//! the entire tick is testable with mock adapters.
//!
//! ```text
//!  EventBus ─────▶ ┌────────────────────────────┐ ──▶ EventSink
//!  WindowSource ─▶ │         PetService         │
//!  AnimationPort ◀▶│ Snapshot · Occlusion · FSM │
//!                  └────────────────────────────┘
//! ```
//!
//! Per tick, strictly in order: drain signals, snapshot, occlusion,
//! playback read-back, FSM (which runs kinematics at most once), present.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;

use crate::config::PetConfig;
use crate::error::{Error, Result};
use crate::events::EventBus;
use crate::fsm::context::PetContext;
use crate::fsm::{Fsm, PetState, StateId, states};
use crate::kinematics::{Kinematics, PetBody, Screen};
use crate::occlusion;
use crate::platform::{Platform, PlatformFilter};

use super::commands::PetCommand;
use super::events::{AppEvent, PetFrame};
use super::ports::{AnimationPort, EventSink, WindowSource};

// ───────────────────────────────────────────────────────────────
// PetService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct PetService {
    fsm: Fsm,
    ctx: PetContext,
    filter: PlatformFilter,
    visible: bool,
    tick_count: u64,
    /// Active platform count seen last tick.
    last_active: Option<usize>,
    /// Candidates (before occlusion) seen last tick.
    last_total: usize,
}

impl PetService {
    /// Construct the service with the body dropped at a random spot in the
    /// top half of the screen.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: PetConfig, screen: Screen) -> Self {
        let filter = PlatformFilter::from_config(&config, screen);
        let mut ctx = PetContext::new(config, screen, Vec2::ZERO);
        let drop = random_drop_point(&mut ctx);
        ctx.body.set_position(drop);

        Self {
            fsm: Fsm::new(PetState::idle()),
            ctx,
            filter,
            visible: true,
            tick_count: 0,
            last_active: None,
            last_total: 0,
        }
    }

    /// Like [`new`](Self::new) but rejects invalid configuration or a
    /// degenerate screen.
    pub fn try_new(config: PetConfig, screen: Screen) -> Result<Self> {
        config.validate()?;
        if !(screen.width > 0.0 && screen.height > 0.0) {
            return Err(Error::Config("screen size must be positive"));
        }
        Ok(Self::new(config, screen))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the initial state's `on_enter`.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "PetService started in {} at ({:.0}, {:.0})",
            self.fsm.current_state().name(),
            self.ctx.body.position.x,
            self.ctx.body.position.y
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full simulation step and return what was presented.
    pub fn tick(
        &mut self,
        bus: &mut EventBus,
        desktop: &mut impl WindowSource,
        anim: &mut impl AnimationPort,
        sink: &mut impl EventSink,
    ) -> PetFrame {
        self.tick_count += 1;

        // 1. Signals published since the last tick
        bus.drain(|signal| {
            debug!("Signal '{}'", signal.name());
            self.handle_command(signal.into(), sink);
        });

        // 2. Platform snapshot
        let records = desktop.windows();
        let candidates = self.filter.build_snapshot(&records);
        let total = candidates.len();

        // 3. Occlusion: a fresh tick-scoped active list
        let resolved = occlusion::resolve(candidates);
        self.ctx.platforms = occlusion::active_only(&resolved);
        let active = self.ctx.platforms.len();
        if self.last_active != Some(active) || self.last_total != total {
            sink.emit(&AppEvent::PlatformsChanged { active, total });
            self.last_active = Some(active);
            self.last_total = total;
        }
        if self.ctx.config.debug {
            for p in &self.ctx.platforms {
                debug!(
                    "  platform '{}' z={} ({:.0}, {:.0}, {:.0}x{:.0}){}",
                    p.owner,
                    p.stack_order,
                    p.rect.x,
                    p.rect.y,
                    p.rect.w,
                    p.rect.h,
                    if p.mandatory { " mandatory" } else { "" }
                );
            }
        }

        // 4. State machine
        self.ctx.playback = anim.playback();
        let prev_state = self.fsm.current_state();
        self.fsm.tick(&mut self.ctx);
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        // 5. Presentation
        let frame = self.frame();
        anim.present(&frame);
        frame
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.  State changes are queued and take
    /// effect at the top of the next FSM tick.
    pub fn handle_command(&mut self, cmd: PetCommand, sink: &mut impl EventSink) {
        match cmd {
            PetCommand::ResetPosition => {
                let drop = random_drop_point(&mut self.ctx);
                self.ctx.body.set_position(drop);
                self.ctx.body.velocity = Vec2::ZERO;
                self.ctx.support = None;
                sink.emit(&AppEvent::PositionReset {
                    x: drop.x,
                    y: drop.y,
                });
            }
            PetCommand::TriggerCustom => {
                self.fsm.request(PetState::jump());
            }
            PetCommand::SetVisible(visible) => {
                if self.visible != visible {
                    self.visible = visible;
                    sink.emit(&AppEvent::VisibilityChanged(visible));
                }
            }
            PetCommand::ForceState(id) => match states::for_id(id, &mut self.ctx) {
                Some(state) => self.fsm.request(state),
                None => warn!("ForceState({}): no active platform to walk to", id.name()),
            },
            PetCommand::UpdateConfig(config) => {
                if let Err(e) = config.validate() {
                    warn!("Rejected configuration update: {}", e);
                    return;
                }
                let screen = self.ctx.screen();
                self.filter = PlatformFilter::from_config(&config, screen);
                self.ctx.kinematics =
                    Kinematics::new(screen, config.fall_speed, config.velocity_damping);
                self.ctx.tick_period_secs = config.tick_secs();
                self.ctx.config = config;
                info!("Configuration updated at runtime");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn body(&self) -> &PetBody {
        &self.ctx.body
    }

    pub fn context(&self) -> &PetContext {
        &self.ctx
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// This tick's active platforms, front to back.
    pub fn active_platforms(&self) -> &[Platform] {
        &self.ctx.platforms
    }

    pub fn config(&self) -> &PetConfig {
        &self.ctx.config
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Move the body directly (embedding code and tests).
    pub fn place(&mut self, position: Vec2) {
        self.ctx.body.set_position(position);
        self.ctx.body.velocity = Vec2::ZERO;
    }

    // ── Internal ──────────────────────────────────────────────

    fn frame(&self) -> PetFrame {
        PetFrame {
            state: self.fsm.current_state(),
            animation: self.ctx.animation.kind,
            animation_name: self.ctx.animation_name().to_string(),
            variant: self.ctx.animation.variant,
            flipped: self.ctx.body.flipped,
            rect: self.ctx.body.rect(),
            visible: self.visible,
        }
    }
}

/// A random top-left position: anywhere horizontally with the body fully on
/// screen, somewhere in the top half vertically.
fn random_drop_point(ctx: &mut PetContext) -> Vec2 {
    let screen = ctx.screen();
    let size = ctx.body.size();
    let max_x = (screen.width - size.x).max(0.0);
    let max_y = screen.height / 2.0;
    let x = if max_x > 0.0 {
        ctx.rng.random_range(0.0..max_x)
    } else {
        0.0
    };
    let y = if max_y > 0.0 {
        ctx.rng.random_range(0.0..max_y)
    } else {
        0.0
    };
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::context::PlaybackSnapshot;
    use crate::geometry::Rect;
    use crate::platform::WindowRecord;

    struct Desk(Vec<WindowRecord>);

    impl WindowSource for Desk {
        fn windows(&mut self) -> Vec<WindowRecord> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Anim {
        frames: Vec<PetFrame>,
    }

    impl AnimationPort for Anim {
        fn playback(&mut self) -> PlaybackSnapshot {
            PlaybackSnapshot::default()
        }
        fn present(&mut self, frame: &PetFrame) {
            self.frames.push(frame.clone());
        }
    }

    #[derive(Default)]
    struct Sink(Vec<AppEvent>);

    impl EventSink for Sink {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(event.clone());
        }
    }

    fn service() -> PetService {
        let config = PetConfig {
            seed: Some(3),
            ..Default::default()
        };
        PetService::new(config, Screen::new(1280.0, 800.0))
    }

    #[test]
    fn initial_drop_is_in_top_half() {
        for seed in 0..50 {
            let config = PetConfig {
                seed: Some(seed),
                ..Default::default()
            };
            let svc = PetService::new(config, Screen::new(1280.0, 800.0));
            let r = svc.body().rect();
            assert!(r.left() >= 0.0 && r.right() <= 1280.0);
            assert!(r.top() >= 0.0 && r.top() < 400.0);
        }
    }

    #[test]
    fn try_new_rejects_bad_config() {
        let config = PetConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(PetService::try_new(config, Screen::new(800.0, 600.0)).is_err());
        assert!(PetService::try_new(PetConfig::default(), Screen::new(0.0, 600.0)).is_err());
        assert!(PetService::try_new(PetConfig::default(), Screen::new(800.0, 600.0)).is_ok());
    }

    #[test]
    fn tick_presents_one_frame_and_reports_platforms() {
        let mut svc = service();
        let mut bus = EventBus::new();
        let mut desk = Desk(vec![WindowRecord::new(
            "Editor",
            Rect::new(0.0, 500.0, 1280.0, 300.0),
            1,
        )]);
        let mut anim = Anim::default();
        let mut sink = Sink::default();

        svc.start(&mut sink);
        let frame = svc.tick(&mut bus, &mut desk, &mut anim, &mut sink);

        assert_eq!(anim.frames, vec![frame.clone()]);
        assert_eq!(svc.active_platforms().len(), 1);
        assert_eq!(sink.0[0], AppEvent::Started(StateId::Idle));
        assert!(sink.0.contains(&AppEvent::PlatformsChanged { active: 1, total: 1 }));
        assert!(frame.visible);
    }

    #[test]
    fn hide_and_show_toggle_visibility_once() {
        let mut svc = service();
        let mut sink = Sink::default();
        svc.handle_command(PetCommand::SetVisible(false), &mut sink);
        svc.handle_command(PetCommand::SetVisible(false), &mut sink);
        assert!(!svc.is_visible());
        svc.handle_command(PetCommand::SetVisible(true), &mut sink);
        assert_eq!(
            sink.0,
            vec![
                AppEvent::VisibilityChanged(false),
                AppEvent::VisibilityChanged(true)
            ]
        );
    }

    #[test]
    fn update_config_rebuilds_physics() {
        let mut svc = service();
        let mut sink = Sink::default();
        let config = PetConfig {
            fps: 32,
            fall_speed: 900.0,
            min_window_width: 10.0,
            ..svc.config().clone()
        };
        svc.handle_command(PetCommand::UpdateConfig(config), &mut sink);
        assert_eq!(svc.context().kinematics.fall_speed, 900.0);
        assert_eq!(svc.context().tick_period_secs, 1.0 / 32.0);
        assert_eq!(svc.config().min_window_width, 10.0);

        let bad = PetConfig {
            velocity_damping: 2.0,
            ..svc.config().clone()
        };
        svc.handle_command(PetCommand::UpdateConfig(bad), &mut sink);
        assert_eq!(svc.config().velocity_damping, 0.7);
    }

    #[test]
    fn force_move_without_platforms_is_ignored() {
        let mut svc = service();
        let mut sink = Sink::default();
        svc.start(&mut sink);
        svc.handle_command(PetCommand::ForceState(StateId::Move), &mut sink);
        assert_eq!(svc.fsm().pending_state(), None);
    }
}
