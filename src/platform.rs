//! Platform snapshot: raw window records in, landable platforms out.
//!
//! The window-enumeration collaborator hands over one [`WindowRecord`] per
//! on-screen window, every field optional.  [`PlatformFilter`] applies the
//! validity rules (size, visibility, excluded owners, the pet's own overlay)
//! and the mandatory classification, producing the per-tick candidate list
//! the occlusion resolver consumes.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::PetConfig;
use crate::error::SnapshotError;
use crate::geometry::Rect;
use crate::kinematics::Screen;

/// Stack order assigned to records that carry no stacking hint.
pub const LOWEST_STACK_ORDER: i64 = i64::MIN;

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

/// One window as reported by the OS enumeration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowRecord {
    /// Window bounds in screen pixels.
    pub bounds: Option<Rect>,
    /// Owning application name.
    pub owner: Option<String>,
    /// Relative stacking position, higher = closer to the front.
    pub stack_hint: Option<i64>,
    /// Whether the window manager reports the window as on screen.
    pub on_screen: bool,
    /// Minimized or parked behind the desktop.
    pub minimized: bool,
}

impl Default for WindowRecord {
    fn default() -> Self {
        Self {
            bounds: None,
            owner: None,
            stack_hint: None,
            on_screen: true,
            minimized: false,
        }
    }
}

impl WindowRecord {
    pub fn new(owner: &str, bounds: Rect, stack_hint: i64) -> Self {
        Self {
            bounds: Some(bounds),
            owner: Some(owner.to_string()),
            stack_hint: Some(stack_hint),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// A window treated as a solid surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    /// Higher = closer to the foreground.
    pub stack_order: i64,
    /// Dock/taskbar: always active, never occludes.
    pub mandatory: bool,
    /// Recomputed every tick by the occlusion resolver.
    pub active: bool,
    pub owner: String,
}

impl Platform {
    pub fn new(rect: Rect, stack_order: i64) -> Self {
        Self {
            rect,
            stack_order,
            mandatory: false,
            active: false,
            owner: String::new(),
        }
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = owner.to_string();
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Cross-tick correlation: platforms carry no identity, so two snapshots
    /// describe the same window when owner and bounds agree.
    pub fn same_window(&self, other: &Platform) -> bool {
        self.owner == other.owner && self.rect == other.rect
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Validity and classification rules derived from configuration.
#[derive(Debug, Clone)]
pub struct PlatformFilter {
    pub screen: Screen,
    pub min_width: f32,
    pub min_height: f32,
    pub mandatory_owners: Vec<String>,
    pub illegal_owners: Vec<String>,
    pub overlay_owner: String,
}

impl PlatformFilter {
    pub fn from_config(config: &PetConfig, screen: Screen) -> Self {
        Self {
            screen,
            min_width: config.min_window_width,
            min_height: config.min_window_height,
            mandatory_owners: config.mandatory_owners.clone(),
            illegal_owners: config.illegal_owners.clone(),
            overlay_owner: config.overlay_owner.clone(),
        }
    }

    /// Convert one record.
    ///
    /// `Ok(None)` means the window is simply not a platform; `Err` means the
    /// record itself is malformed.
    pub fn classify(&self, record: &WindowRecord) -> Result<Option<Platform>, SnapshotError> {
        let rect = record.bounds.ok_or(SnapshotError::MissingBounds)?;
        if !(rect.x.is_finite() && rect.y.is_finite() && rect.w.is_finite() && rect.h.is_finite())
        {
            return Err(SnapshotError::NonFiniteBounds);
        }
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return Err(SnapshotError::DegenerateBounds);
        }

        if !record.on_screen || record.minimized {
            return Ok(None);
        }
        if !rect.collides(&self.screen.rect()) {
            return Ok(None);
        }

        let owner = record.owner.as_deref().unwrap_or("");
        if !owner.is_empty()
            && (owner == self.overlay_owner || self.illegal_owners.iter().any(|o| o == owner))
        {
            return Ok(None);
        }

        let mandatory = !owner.is_empty() && self.mandatory_owners.iter().any(|o| o == owner);
        if !mandatory && (rect.w < self.min_width || rect.h < self.min_height) {
            return Ok(None);
        }

        let mut platform =
            Platform::new(rect, record.stack_hint.unwrap_or(LOWEST_STACK_ORDER)).with_owner(owner);
        platform.mandatory = mandatory;
        Ok(Some(platform))
    }

    /// Build the candidate list for one tick.  Malformed records are logged
    /// and skipped; they never fail the tick.
    pub fn build_snapshot(&self, records: &[WindowRecord]) -> Vec<Platform> {
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            match self.classify(record) {
                Ok(Some(p)) => out.push(p),
                Ok(None) => {}
                Err(e) => warn!(
                    "Snapshot: skipping window of '{}': {}",
                    record.owner.as_deref().unwrap_or("?"),
                    e
                ),
            }
        }
        debug!("Snapshot: {} of {} windows are candidates", out.len(), records.len());
        out
    }
}
