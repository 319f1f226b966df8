//! Integration tests for the EventBus → PetService → FSM → presentation
//! pipeline.
//!
//! These drive the full tick against a mock desktop and the scripted frame
//! clock, asserting on presented frames and emitted events.

use glam::Vec2;

use windowpet::adapters::scripted::{FrameClock, Scene, ScriptedDesktop};
use windowpet::app::commands::PetCommand;
use windowpet::app::events::{AppEvent, PetFrame};
use windowpet::app::service::PetService;
use windowpet::config::PetConfig;
use windowpet::events::{EventBus, Signal};
use windowpet::fsm::StateId;
use windowpet::geometry::Rect;
use windowpet::kinematics::Screen;

use super::mock_desktop::{MockDesktop, RecordingSink};

const SCREEN: Screen = Screen::new(1280.0, 800.0);

struct Rig {
    svc: PetService,
    bus: EventBus,
    desk: MockDesktop,
    clock: FrameClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(desk: MockDesktop) -> Self {
        let config = PetConfig {
            seed: Some(21),
            ..Default::default()
        };
        Self::with_config(config, desk)
    }

    fn with_config(config: PetConfig, desk: MockDesktop) -> Self {
        let mut svc = PetService::try_new(config, SCREEN).expect("valid config");
        let mut sink = RecordingSink::new();
        svc.start(&mut sink);
        Self {
            svc,
            bus: EventBus::new(),
            desk,
            clock: FrameClock::default(),
            sink,
        }
    }

    fn tick(&mut self) -> PetFrame {
        self.svc
            .tick(&mut self.bus, &mut self.desk, &mut self.clock, &mut self.sink)
    }

    fn run(&mut self, ticks: usize) -> PetFrame {
        let mut last = self.tick();
        for _ in 1..ticks {
            last = self.tick();
        }
        last
    }

    fn command(&mut self, cmd: PetCommand) {
        self.svc.handle_command(cmd, &mut self.sink);
    }
}

// ── Gravity and landing ──────────────────────────────────────

#[test]
fn free_falls_to_screen_floor_without_platforms() {
    let mut rig = Rig::new(MockDesktop::new());
    rig.svc.place(Vec2::new(200.0, 0.0));

    for _ in 0..60 {
        let frame = rig.tick();
        assert!(frame.rect.bottom() <= SCREEN.height);
    }
    assert_eq!(rig.svc.state(), StateId::Idle);
    assert_eq!(rig.svc.body().rect().bottom(), SCREEN.height);
    assert!(rig.sink.contains(&AppEvent::StateChanged {
        from: StateId::Idle,
        to: StateId::Fall
    }));
    assert!(rig.sink.contains(&AppEvent::StateChanged {
        from: StateId::Fall,
        to: StateId::Idle
    }));
}

#[test]
fn lands_on_window_top_edge() {
    let desk = MockDesktop::new().with("Editor", Rect::new(0.0, 400.0, 1280.0, 300.0), 1);
    let mut rig = Rig::new(desk);
    rig.svc.place(Vec2::new(300.0, 0.0));

    rig.run(40);
    assert_eq!(rig.svc.state(), StateId::Idle);
    assert_eq!(rig.svc.body().position.y, 400.0 - 100.0 + 1.0);
    let support = rig.svc.context().support.as_ref().map(|p| p.owner.as_str());
    assert_eq!(support, Some("Editor"));
}

#[test]
fn low_frame_rate_still_lands_on_window_top_edge() {
    // 240 px of fall per tick, more than the body is tall.
    let config = PetConfig {
        fps: 2,
        move_speed: 30.0,
        seed: Some(21),
        ..Default::default()
    };
    let desk = MockDesktop::new().with("Editor", Rect::new(0.0, 400.0, 1280.0, 300.0), 1);
    let mut rig = Rig::with_config(config, desk);
    rig.svc.place(Vec2::new(300.0, 0.0));

    rig.run(6);
    assert_eq!(rig.svc.state(), StateId::Idle);
    assert_eq!(rig.svc.body().position.y, 301.0);
}

#[test]
fn occluded_window_is_not_landable() {
    let desk = MockDesktop::new()
        .with("Front", Rect::new(0.0, 300.0, 1280.0, 500.0), 2)
        .with("Back", Rect::new(100.0, 350.0, 400.0, 200.0), 1);
    let mut rig = Rig::new(desk);
    rig.svc.place(Vec2::new(150.0, 320.0));

    rig.run(40);
    let owners: Vec<_> = rig.svc.active_platforms().iter().map(|p| p.owner.as_str()).collect();
    assert_eq!(owners, vec!["Front"]);
    // Fell straight through the hidden window's edges to the floor.
    assert_eq!(rig.svc.body().position.y, 700.0);
}

#[test]
fn dock_stays_active_under_a_covering_window() {
    let desk = MockDesktop::new()
        .with("Dock", Rect::new(300.0, 760.0, 600.0, 40.0), 0)
        .with("Fullscreen", Rect::new(0.0, 0.0, 1280.0, 800.0), 5);
    let mut rig = Rig::new(desk);
    rig.tick();

    let owners: Vec<_> = rig.svc.active_platforms().iter().map(|p| p.owner.as_str()).collect();
    assert_eq!(owners, vec!["Fullscreen", "Dock"]);
}

#[test]
fn dock_never_hides_what_it_covers() {
    let desk = MockDesktop::new()
        .with("Dock", Rect::new(0.0, 500.0, 1280.0, 300.0), 10)
        .with("Viewer", Rect::new(100.0, 550.0, 300.0, 200.0), 1);
    let mut rig = Rig::new(desk);
    rig.tick();
    assert_eq!(rig.svc.active_platforms().len(), 2);
}

#[test]
fn filtered_windows_never_become_platforms() {
    let desk = MockDesktop::new()
        .with("Spotlight", Rect::new(100.0, 100.0, 600.0, 300.0), 9)
        .with("windowpet", Rect::new(0.0, 0.0, 1280.0, 800.0), 50)
        .with("Tiny", Rect::new(0.0, 0.0, 50.0, 50.0), 1)
        .with("Offscreen", Rect::new(2000.0, 0.0, 400.0, 400.0), 1);
    let mut rig = Rig::new(desk);
    rig.tick();
    assert!(rig.svc.active_platforms().is_empty());
    assert!(rig.sink.contains(&AppEvent::PlatformsChanged { active: 0, total: 0 }));
}

// ── Move target lifecycle ─────────────────────────────────────

#[test]
fn vanished_target_window_sends_pet_back_to_idle() {
    let desk = MockDesktop::new().with("Chat", Rect::new(800.0, 200.0, 300.0, 200.0), 1);
    let mut rig = Rig::new(desk);
    rig.svc.place(Vec2::new(100.0, 700.0));
    rig.tick();
    assert_eq!(rig.svc.state(), StateId::Idle);

    rig.command(PetCommand::ForceState(StateId::Move));
    let frame = rig.tick();
    assert_eq!(frame.state, StateId::Move);
    assert_eq!(frame.animation_name, "run");

    rig.run(4);
    assert_eq!(rig.svc.state(), StateId::Move);
    assert!(rig.svc.body().position.x > 100.0);

    rig.desk.remove("Chat");
    let back_to_idle = (0..10).any(|_| rig.tick().state == StateId::Idle);
    assert!(back_to_idle);
    assert!(rig.sink.contains(&AppEvent::StateChanged {
        from: StateId::Move,
        to: StateId::Idle
    }));
    assert!(rig.sink.contains(&AppEvent::PlatformsChanged { active: 0, total: 0 }));
}

#[test]
fn walk_ends_in_a_jump_then_idle() {
    let desk = MockDesktop::new().with("Shelf", Rect::new(0.0, 300.0, 600.0, 100.0), 1);
    let mut rig = Rig::new(desk);
    rig.svc.place(Vec2::new(900.0, 700.0));
    rig.tick();

    rig.command(PetCommand::ForceState(StateId::Move));
    let mut seen = Vec::new();
    for _ in 0..200 {
        let state = rig.tick().state;
        if seen.last() != Some(&state) {
            seen.push(state);
        }
    }
    assert_eq!(&seen[..3], &[StateId::Move, StateId::Jump, StateId::Idle]);
    assert!(rig.svc.body().position.x < 600.0 + 10.0);
}

// ── Signals ───────────────────────────────────────────────────

#[test]
fn custom_signal_jumps_and_restores_size() {
    let mut rig = Rig::new(MockDesktop::new());
    rig.svc.place(Vec2::new(500.0, 700.0));
    rig.tick();

    assert!(rig.bus.publish(Signal::Custom));
    let frame = rig.tick();
    assert_eq!(frame.state, StateId::Jump);
    assert_eq!(frame.animation_name, "jump");
    assert_eq!(frame.rect.size(), Vec2::new(128.0, 128.0));
    assert_eq!(frame.rect.bottom(), SCREEN.height);
    assert_eq!(frame.rect.center_x(), 550.0);

    let mut ticks = 0;
    while rig.tick().state == StateId::Jump {
        ticks += 1;
        assert!(ticks < 40, "jump never finished");
    }
    assert!(ticks >= 24, "jump ended after {ticks} ticks");
    assert_eq!(rig.svc.body().rect(), Rect::new(500.0, 700.0, 100.0, 100.0));
}

#[test]
fn custom_signal_interrupts_a_fall() {
    let mut rig = Rig::new(MockDesktop::new());
    rig.svc.place(Vec2::new(500.0, 0.0));
    rig.run(3);
    assert_eq!(rig.svc.state(), StateId::Fall);

    rig.bus.publish_named("custom");
    assert_eq!(rig.tick().state, StateId::Jump);
}

#[test]
fn reset_signal_drops_pet_in_top_half() {
    let mut rig = Rig::new(MockDesktop::new());
    rig.svc.place(Vec2::new(500.0, 700.0));
    rig.tick();

    rig.bus.publish(Signal::Reset);
    rig.tick();
    let resets = rig.sink.position_resets();
    assert_eq!(resets.len(), 1);
    let (x, y) = resets[0];
    assert!((0.0..=SCREEN.width - 100.0).contains(&x));
    assert!((0.0..SCREEN.height / 2.0).contains(&y));
    assert_eq!(rig.svc.body().velocity.x, 0.0);

    rig.run(60);
    assert_eq!(rig.svc.state(), StateId::Idle);
    assert_eq!(rig.svc.body().rect().bottom(), SCREEN.height);
}

#[test]
fn hide_and_show_only_toggle_visibility() {
    let mut rig = Rig::new(MockDesktop::new());
    rig.svc.place(Vec2::new(500.0, 700.0));
    rig.tick();

    rig.bus.publish(Signal::Hide);
    let hidden = rig.tick();
    assert!(!hidden.visible);
    assert_eq!(hidden.state, StateId::Idle);

    rig.bus.publish(Signal::Show);
    assert!(rig.tick().visible);
    assert!(rig.sink.contains(&AppEvent::VisibilityChanged(false)));
    assert!(rig.sink.contains(&AppEvent::VisibilityChanged(true)));
}

#[test]
fn signals_are_handled_in_publish_order() {
    let mut rig = Rig::new(MockDesktop::new());
    rig.svc.place(Vec2::new(500.0, 700.0));
    rig.tick();

    rig.bus.publish(Signal::Hide);
    rig.bus.publish(Signal::Show);
    rig.bus.publish(Signal::Hide);
    let frame = rig.tick();
    assert!(!frame.visible);
    assert!(rig.bus.is_empty());
}

// ── Long run against the demo scene ──────────────────────────

#[test]
fn demo_scene_long_run_keeps_invariants() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/desk.json");
    let scene = Scene::load(&path).expect("demo scene");
    let screen = scene.screen();
    let mut desk = ScriptedDesktop::new(scene);
    let mut clock = FrameClock::default();
    let mut sink = RecordingSink::new();
    let mut bus = EventBus::new();

    let config = PetConfig {
        seed: Some(11),
        ..Default::default()
    };
    let mut svc = PetService::try_new(config, screen).expect("valid config");
    svc.start(&mut sink);

    for tick in 0..2000u64 {
        if tick == 700 {
            bus.publish(Signal::Reset);
        }
        let frame = svc.tick(&mut bus, &mut desk, &mut clock, &mut sink);
        assert!(frame.rect.bottom() <= screen.height, "tick {tick}");

        let fsm = svc.fsm();
        for id in StateId::ALL {
            let extra = u64::from(id == fsm.current_state());
            assert_eq!(fsm.enter_count(id), fsm.exit_count(id) + extra, "tick {tick}");
        }
    }

    assert!(svc.fsm().enter_count(StateId::Move) >= 1);
    assert_eq!(svc.fsm().enter_count(StateId::Run), 0);
    assert_eq!(svc.tick_count(), 2000);
}
