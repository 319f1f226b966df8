//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  Everything runs headless; no window system is
//! required.

mod mock_desktop;
mod scenario_tests;
mod service_tests;
