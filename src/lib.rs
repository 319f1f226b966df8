//! WindowPet engine library.
//!
//! A desktop creature that treats other application windows as platforms:
//! the occlusion resolver decides which windows are landable, the
//! kinematics engine moves the body against them, and the behaviour FSM
//! decides what the creature does each tick.  Window enumeration, sprite
//! playback and presentation are reached through the port traits in
//! [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod kinematics;
pub mod occlusion;
pub mod platform;
pub mod timers;

pub mod adapters;
