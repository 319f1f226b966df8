//! Occlusion resolver.
//!
//! Decides, once per tick, which candidate platforms are visible enough to
//! stand on.  A platform is occluded only when a window strictly in front of
//! it *fully contains* it; partial overlap leaves both landable.
//!
//! ```text
//!   stack order ▲
//!       5 │  ┌──────────────┐  front window (active)
//!       3 │  │   ┌──────┐   │  fully inside → inactive
//!       1 │  │   │      │   │     ┌───────┐  overlaps edge → active
//!         │  └───┴──────┴───┘     └───────┘
//! ```
//!
//! Mandatory platforms (dock, taskbar) are always active and never hide
//! anything.  Both rectangles are clamped to the screen origin and eroded by
//! one pixel before the containment test so that windows that merely share
//! a border, or stick out past the top-left of the screen, are not judged
//! covered.

use log::{debug, warn};

use crate::geometry::Rect;
use crate::platform::Platform;

/// Pixels shaved off every edge before the containment test.
pub const EROSION: f32 = 1.0;

/// The rectangle used for containment tests.
fn occlusion_rect(rect: &Rect) -> Rect {
    rect.clamped_to_origin().eroded(EROSION)
}

/// Does `container` hide `victim` completely?
pub fn occludes(container: &Platform, victim: &Platform) -> bool {
    if container.mandatory || container.stack_order <= victim.stack_order {
        return false;
    }
    let outer = occlusion_rect(&container.rect);
    let inner = occlusion_rect(&victim.rect);
    if outer.w <= 0.0 || outer.h <= 0.0 {
        return false;
    }
    outer.contains(&inner)
}

/// Order candidates front-to-back and populate `active`.
///
/// The sort is stable, so platforms sharing a stack order keep their
/// snapshot order and the result is deterministic for a given input.
/// Degenerate rectangles are dropped with a diagnostic.
pub fn resolve(candidates: Vec<Platform>) -> Vec<Platform> {
    let mut platforms: Vec<Platform> = candidates
        .into_iter()
        .filter(|p| {
            if p.rect.is_degenerate() {
                warn!("Occlusion: dropping degenerate platform of '{}'", p.owner);
                false
            } else {
                true
            }
        })
        .collect();

    platforms.sort_by(|a, b| b.stack_order.cmp(&a.stack_order));

    for i in 0..platforms.len() {
        let active = platforms[i].mandatory
            || !platforms[..i]
                .iter()
                .any(|container| occludes(container, &platforms[i]));
        platforms[i].active = active;
    }

    debug!(
        "Occlusion: {} of {} platforms active",
        platforms.iter().filter(|p| p.active).count(),
        platforms.len()
    );
    platforms
}

/// Clone out the active subset, preserving front-to-back order.
pub fn active_only(resolved: &[Platform]) -> Vec<Platform> {
    resolved.iter().filter(|p| p.active).cloned().collect()
}
