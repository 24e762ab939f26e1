//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `runtime.rs` — one-shot search/filter/roles/validate commands.
//! - `session.rs` — stdin event loop driving the mounted widgets with debounce.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate widget behavior to `services/*`.
//! - Keep behavior and output schema stable.

pub mod runtime;
pub mod session;

pub use runtime::handle_runtime_commands;
pub use session::handle_session_command;
