//! Concrete state handlers and target selection.
//!
//! One `match` per lifecycle hook over the closed [`PetState`] variant.
//! State-local timers live inside the variant and are advanced by the
//! state's own `update()` with the tick duration.
//!
//! ```text
//!            ┌──────────[wander fires, target picked]──────────┐
//!            │                                                 ▼
//!  FALL ──[grounded]──▶ IDLE ◀──[no target / target gone]──── MOVE
//!    ▲                   │ ▲                                   │
//!    └──[not grounded]───┘ └────[frame > end]──── JUMP ◀──[|dx| < arrive]
//!
//!  Any state ──[custom]──▶ JUMP
//! ```

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use super::context::{AnimationKind, PetContext};
use super::{PetState, StateId};
use crate::geometry::Rect;
use crate::platform::Platform;
use crate::timers::{Countdown, IntervalTimer, jittered};

// ═══════════════════════════════════════════════════════════════════════════
//  State-local data
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdleState {
    /// Re-rolls the idle animation without leaving the state.
    pub refresh: Countdown,
    /// Starts a walk when it fires.
    pub wander: Countdown,
}

/// Where a walk is headed.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTarget {
    /// The platform the target rests on; the walk is abandoned once it is
    /// no longer active.
    pub platform: Option<Platform>,
    /// Body top-left at arrival.
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveState {
    pub target: Option<MoveTarget>,
    pub validity: IntervalTimer,
}

impl MoveState {
    pub fn new(target: MoveTarget) -> Self {
        Self {
            target: Some(target),
            validity: IntervalTimer::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JumpState {
    /// Body rect before the jump sprite resized it.
    pub saved_rect: Option<Rect>,
}

/// Build a fresh state for `id`.  `Move` needs a target and yields `None`
/// when no active platform exists.
pub fn for_id(id: StateId, ctx: &mut PetContext) -> Option<PetState> {
    match id {
        StateId::Idle => Some(PetState::idle()),
        StateId::Move => pick_target(ctx).map(PetState::moving),
        StateId::Jump => Some(PetState::jump()),
        StateId::Fall => Some(PetState::Fall),
        StateId::Run => Some(PetState::Run),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Dispatch
// ═══════════════════════════════════════════════════════════════════════════

pub fn on_enter(state: &mut PetState, ctx: &mut PetContext) {
    match state {
        PetState::Idle(idle) => idle_enter(idle, ctx),
        PetState::Move(mv) => move_enter(mv, ctx),
        PetState::Jump(jump) => jump_enter(jump, ctx),
        PetState::Fall => ctx.play(AnimationKind::Fall),
        PetState::Run => {}
    }
}

pub fn on_exit(state: &mut PetState, ctx: &mut PetContext) {
    match state {
        PetState::Idle(idle) => {
            idle.refresh.cancel();
            idle.wander.cancel();
        }
        PetState::Move(mv) => mv.validity.stop(),
        PetState::Jump(jump) => jump_exit(jump, ctx),
        PetState::Fall | PetState::Run => {}
    }
}

pub fn update(state: &mut PetState, ctx: &mut PetContext) -> Option<PetState> {
    match state {
        PetState::Idle(idle) => idle_update(idle, ctx),
        PetState::Move(mv) => move_update(mv, ctx),
        PetState::Jump(_) => jump_update(ctx),
        PetState::Fall => fall_update(ctx),
        PetState::Run => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(idle: &mut IdleState, ctx: &mut PetContext) {
    ctx.body.velocity.x = 0.0;
    ctx.play(AnimationKind::Idle);
    arm_refresh(idle, ctx);
    arm_wander(idle, ctx);
    debug!(
        "IDLE: refresh in {:.0}ms, wander in {:.0}ms",
        idle.refresh.remaining_ms().unwrap_or_default(),
        idle.wander.remaining_ms().unwrap_or_default()
    );
}

fn idle_update(idle: &mut IdleState, ctx: &mut PetContext) -> Option<PetState> {
    if !ctx.step_body(0.0).grounded() {
        return Some(PetState::Fall);
    }

    let dt_ms = ctx.tick_ms();
    if idle.refresh.tick(dt_ms) {
        ctx.reroll_animation();
        arm_refresh(idle, ctx);
    }

    if idle.wander.tick(dt_ms) {
        match pick_target(ctx) {
            Some(target) => {
                info!(
                    "IDLE: wandering to ({:.0}, {:.0})",
                    target.position.x, target.position.y
                );
                return Some(PetState::moving(target));
            }
            None => arm_wander(idle, ctx),
        }
    }

    None
}

fn arm_refresh(idle: &mut IdleState, ctx: &mut PetContext) {
    let cfg = &ctx.config;
    let ms = jittered(&mut ctx.rng, cfg.idle_refresh_ms, cfg.idle_refresh_jitter_ms);
    idle.refresh.arm(ms);
}

fn arm_wander(idle: &mut IdleState, ctx: &mut PetContext) {
    let cfg = &ctx.config;
    let ms = jittered(&mut ctx.rng, cfg.wander_ms, cfg.wander_jitter_ms);
    idle.wander.arm(ms);
}

/// Choose somewhere to walk to.
///
/// A fair coin decides between the platform the pet stands on (when it is
/// still active) and any active platform.  The target x is uniform across
/// the part of the platform's width where the body can stand on screen, or
/// the nearest reachable x when no such part exists.  The target y puts the
/// body's feet on either the top or the bottom edge.
pub fn pick_target(ctx: &mut PetContext) -> Option<MoveTarget> {
    let current = ctx.support.as_ref().filter(|p| ctx.is_active(p)).cloned();

    let platform = match current {
        Some(p) if ctx.rng.random_bool(0.5) => p,
        _ => {
            if ctx.platforms.is_empty() {
                return None;
            }
            let i = ctx.rng.random_range(0..ctx.platforms.len());
            ctx.platforms[i].clone()
        }
    };

    let rect = platform.rect;
    if !(rect.w > 0.0) {
        return None;
    }
    // Must be reachable: the body never leaves the screen.
    let max_x = (ctx.screen().width - ctx.body.size().x).max(0.0);
    let lo = rect.left().clamp(0.0, max_x);
    let hi = rect.right().min(max_x);
    let x = if hi > lo {
        lo + ctx.rng.random::<f32>() * (hi - lo)
    } else {
        // Too thin to sample, or entirely beyond the reachable span.
        lo
    };
    let height = ctx.body.size().y;
    let y = if ctx.rng.random_bool(0.5) {
        rect.top() - height
    } else {
        rect.bottom() - height
    };

    Some(MoveTarget {
        platform: Some(platform),
        position: Vec2::new(x, y),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
//  MOVE
// ═══════════════════════════════════════════════════════════════════════════

fn move_enter(mv: &mut MoveState, ctx: &mut PetContext) {
    mv.validity.start(ctx.config.target_check_ms as f32);
    ctx.play(AnimationKind::Run);
}

fn move_update(mv: &mut MoveState, ctx: &mut PetContext) -> Option<PetState> {
    let Some(target) = mv.target.as_ref() else {
        return Some(PetState::idle());
    };

    if mv.validity.tick(ctx.tick_ms()) {
        if let Some(platform) = &target.platform {
            if !ctx.is_active(platform) {
                info!("MOVE: target on '{}' is gone", platform.owner);
                return Some(PetState::idle());
            }
        }
    }

    let dx = target.position.x - ctx.body.position.x;
    if dx.abs() < ctx.config.arrive_distance {
        ctx.body.velocity.x = 0.0;
        return Some(PetState::jump());
    }

    ctx.body.flipped = dx < 0.0;
    let speed = ctx.config.move_speed.copysign(dx);
    if ctx.step_body(speed).grounded() {
        ctx.play(AnimationKind::Run);
    } else {
        ctx.play(AnimationKind::Fall);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  JUMP
// ═══════════════════════════════════════════════════════════════════════════

fn jump_enter(jump: &mut JumpState, ctx: &mut PetContext) {
    // Always restart from the first frame.
    ctx.animation.kind = AnimationKind::Jump;
    ctx.reroll_animation();

    let rect = ctx.body.rect();
    jump.saved_rect = Some(rect);
    ctx.body.set_rect(rect.resized_anchored(ctx.jump_size()));
}

fn jump_update(ctx: &mut PetContext) -> Option<PetState> {
    let playback = ctx.playback;
    if playback.variant == ctx.animation.variant
        && playback.frame_index > ctx.config.jump_end_frame
    {
        return Some(PetState::idle());
    }
    None
}

fn jump_exit(jump: &mut JumpState, ctx: &mut PetContext) {
    if let Some(saved) = jump.saved_rect.take() {
        let restored = ctx.body.rect().resized_anchored(saved.size());
        ctx.body.set_rect(restored);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  FALL
// ═══════════════════════════════════════════════════════════════════════════

fn fall_update(ctx: &mut PetContext) -> Option<PetState> {
    if ctx.step_body(0.0).grounded() {
        return Some(PetState::idle());
    }
    None
}
