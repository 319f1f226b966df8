//! Application core: pure domain logic, zero I/O.
//!
//! Orchestrates one simulation tick: window snapshot, occlusion, the pet
//! state machine and kinematics.  Everything outside the process (window
//! enumeration, sprite playback, logging, settings files) is reached
//! through the **port traits** in [`ports`], so the whole core runs against
//! mock adapters in tests.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
