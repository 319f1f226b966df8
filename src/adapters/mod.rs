//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to                     |
//! |----------------|----------------|---------------------------------|
//! | `log_sink`     | EventSink      | `log` facade                    |
//! | `json_config`  | ConfigPort     | JSON settings file              |
//! | `scripted`     | WindowSource   | JSON scene with timed windows   |
//! |                | AnimationPort  | Tick-driven frame counter       |

pub mod json_config;
pub mod log_sink;
pub mod scripted;
