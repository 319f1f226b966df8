//! End-to-end reference scenarios, one per core subsystem.

use glam::Vec2;

use windowpet::app::service::PetService;
use windowpet::config::PetConfig;
use windowpet::events::EventBus;
use windowpet::adapters::scripted::FrameClock;
use windowpet::fsm::context::PetContext;
use windowpet::fsm::states::pick_target;
use windowpet::geometry::Rect;
use windowpet::kinematics::{Kinematics, PetBody, Screen};
use windowpet::occlusion;
use windowpet::platform::Platform;

use super::mock_desktop::{MockDesktop, RecordingSink};

// ── Scenario 1: a contained back window is occluded ──────────

#[test]
fn scenario_1_contained_window_is_occluded() {
    let p1 = Platform::new(Rect::new(0.0, 0.0, 200.0, 20.0), 2).with_owner("P1");
    let p2 = Platform::new(Rect::new(0.0, 0.0, 100.0, 20.0), 1).with_owner("P2");

    for input in [vec![p1.clone(), p2.clone()], vec![p2.clone(), p1.clone()]] {
        let resolved = occlusion::resolve(input);
        let active = |owner: &str| {
            resolved
                .iter()
                .find(|p| p.owner == owner)
                .map(|p| p.active)
        };
        assert_eq!(active("P1"), Some(true));
        assert_eq!(active("P2"), Some(false));
    }
}

#[test]
fn scenario_1_through_the_service() {
    let config = PetConfig {
        seed: Some(1),
        min_window_width: 10.0,
        min_window_height: 10.0,
        ..Default::default()
    };
    let mut svc = PetService::try_new(config, Screen::new(800.0, 600.0)).expect("valid config");
    let mut desk = MockDesktop::new()
        .with("P1", Rect::new(0.0, 0.0, 200.0, 20.0), 2)
        .with("P2", Rect::new(0.0, 0.0, 100.0, 20.0), 1);
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    svc.tick(&mut EventBus::new(), &mut desk, &mut FrameClock::default(), &mut sink);

    let owners: Vec<_> = svc.active_platforms().iter().map(|p| p.owner.as_str()).collect();
    assert_eq!(owners, vec!["P1"]);
}

// ── Scenario 2: landing snap ─────────────────────────────────

#[test]
fn scenario_2_landing_snap() {
    let engine = Kinematics::new(Screen::new(800.0, 600.0), 50.0, 0.7);
    let mut body = PetBody::new(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0));
    body.velocity = Vec2::new(0.0, 50.0);
    let mut platform = Platform::new(Rect::new(0.0, 100.0, 200.0, 10.0), 1);
    platform.active = true;

    let hit = engine.step(&mut body, &[platform], 0.0, 1.0);
    assert!(hit.hit_bottom);
    assert_eq!(body.position.y, 100.0 - body.size().y + 1.0);
    assert_eq!(body.velocity.y, 0.0);
}

// ── Scenario 3: target generation ────────────────────────────

#[test]
fn scenario_3_targets_stay_on_the_platform() {
    let config = PetConfig {
        seed: Some(2024),
        ..Default::default()
    };
    let mut ctx = PetContext::new(config, Screen::new(1920.0, 1080.0), Vec2::ZERO);
    let mut platform = Platform::new(Rect::new(0.0, 500.0, 100.0, 200.0), 1).with_owner("Only");
    platform.active = true;
    ctx.platforms = vec![platform.clone()];
    let h = ctx.body.size().y;

    let mut tops = 0;
    for _ in 0..1000 {
        let target = pick_target(&mut ctx).expect("an active platform exists");
        assert!((0.0..100.0).contains(&target.position.x));
        let y = target.position.y;
        assert!(y == 500.0 - h || y == 700.0 - h, "y = {y}");
        if y == 500.0 - h {
            tops += 1;
        }
        assert_eq!(target.platform.as_ref(), Some(&platform));
    }
    // Both edges get picked.
    assert!(tops > 0 && tops < 1000);
}
