//! Body kinematics and per-axis collision resolution.
//!
//! One [`Kinematics::step`] per tick:
//!
//! 1. vertical velocity is reset to the constant fall speed
//! 2. integrate x, clamp to the screen sides
//! 3. integrate y in slices shorter than the body
//! 4. after each slice, resolve against every active platform's top and
//!    bottom edge lines; the first slice that hits one ends the move
//! 5. clamp to the screen floor
//! 6. damp velocity
//!
//! Platforms block only vertically.  Walking into the side of a window
//! passes straight through it; the pet cannot be pinned against a wall.

use glam::Vec2;
use log::debug;

use crate::geometry::Rect;
use crate::platform::Platform;

/// Upper bound on vertical slices per step.
const MAX_SLICES: f32 = 4096.0;

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// The drawable screen area, origin at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// The simulated creature.
///
/// `position` is the top-left corner of the bounding box.  The cached rect
/// is re-synchronised whenever position or size changes through the
/// setters, and by [`Kinematics::step`] after every axis move.
#[derive(Debug, Clone, PartialEq)]
pub struct PetBody {
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Facing left.  Rendering only.
    pub flipped: bool,
    size: Vec2,
    rect: Rect,
}

impl PetBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            flipped: false,
            size,
            rect: Rect::from_origin_size(position, size),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.sync();
    }

    /// Replace the whole bounding rect (position and size).
    pub fn set_rect(&mut self, rect: Rect) {
        self.size = rect.size();
        self.position = rect.origin();
        self.sync();
    }

    fn sync(&mut self) {
        self.rect = Rect::from_origin_size(self.position, self.size);
    }
}

// ---------------------------------------------------------------------------
// Collision result
// ---------------------------------------------------------------------------

/// Which sides were blocked during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub hit_top: bool,
    pub hit_bottom: bool,
    pub hit_left: bool,
    pub hit_right: bool,
    /// Index into the platform slice of the platform the body rests on.
    /// `None` while airborne or when standing on the screen floor.
    pub support: Option<usize>,
}

impl CollisionResult {
    pub fn grounded(&self) -> bool {
        self.hit_bottom
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless step function parameterised by screen and physics constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub screen: Screen,
    /// Constant downward speed (px/s); not integrated as acceleration.
    pub fall_speed: f32,
    /// Velocity multiplier applied at the end of every step.
    pub damping: f32,
}

impl Kinematics {
    pub fn new(screen: Screen, fall_speed: f32, damping: f32) -> Self {
        Self {
            screen,
            fall_speed,
            damping,
        }
    }

    /// Advance `body` by `dt` seconds against `platforms`.
    ///
    /// A non-zero `intent_x` sets horizontal velocity; zero leaves the
    /// current (decaying) horizontal velocity alone.  Inactive or degenerate
    /// platforms are ignored.
    pub fn step(
        &self,
        body: &mut PetBody,
        platforms: &[Platform],
        intent_x: f32,
        dt: f32,
    ) -> CollisionResult {
        let mut hit = CollisionResult::default();

        // 1. Instant terminal velocity
        body.velocity.y = self.fall_speed;
        if intent_x != 0.0 {
            body.velocity.x = intent_x;
        }

        // 2. x axis
        body.position.x += body.velocity.x * dt;
        body.sync();
        if body.rect.left() < 0.0 {
            body.position.x = 0.0;
            body.velocity.x = 0.0;
            hit.hit_left = true;
            body.sync();
        } else if body.rect.right() > self.screen.width {
            body.position.x = self.screen.width - body.size.x;
            body.velocity.x = 0.0;
            hit.hit_right = true;
            body.sync();
        }

        // 3-4. y axis against platform edge lines, in slices shorter than
        // the body so a fast fall cannot skip over a 1 px line.
        let dy = body.velocity.y * dt;
        let slices = (dy.abs() / (body.size.y - 1.0).max(1.0))
            .ceil()
            .clamp(1.0, MAX_SLICES);
        let slice = dy / slices;
        let falling = body.velocity.y > 0.0;
        for _ in 0..slices as u32 {
            body.position.y += slice;
            body.sync();
            if self.resolve_edges(body, platforms, falling, &mut hit) {
                break;
            }
        }

        // 5. Screen floor
        if body.rect.bottom() >= self.screen.height {
            body.position.y = self.screen.height - body.size.y;
            body.velocity.y = 0.0;
            hit.hit_bottom = true;
            hit.support = None;
            body.sync();
        }

        // 6. Damping
        body.velocity *= self.damping;

        hit
    }

    /// Snap `body` against every active platform's top and bottom edge
    /// lines.  Returns `true` if any line was hit.
    fn resolve_edges(
        &self,
        body: &mut PetBody,
        platforms: &[Platform],
        falling: bool,
        hit: &mut CollisionResult,
    ) -> bool {
        let mut blocked = false;
        for (i, platform) in platforms.iter().enumerate() {
            if !platform.active {
                continue;
            }
            if platform.rect.is_degenerate() {
                debug!("Kinematics: skipping degenerate platform of '{}'", platform.owner);
                continue;
            }
            for edge in [platform.rect.top_edge(), platform.rect.bottom_edge()] {
                if !body.rect.collides(&edge) {
                    continue;
                }
                if falling {
                    // Rest on the line: last pixel row of the body on the edge.
                    body.position.y = edge.top() - body.size.y + 1.0;
                    hit.hit_bottom = true;
                    hit.support = Some(i);
                } else {
                    body.position.y = edge.bottom() - 1.0;
                    hit.hit_top = true;
                }
                body.velocity.y = 0.0;
                body.sync();
                blocked = true;
            }
        }
        blocked
    }
}
