//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep index, page snapshot and report structs in one place.
//! - Avoid cyclic imports between widgets and command handlers.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — index entries, page snapshot, report/output structs.
//! - `constants.rs` — fixed lookup tables (status, category, position, icon).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and integration contracts.
//! Keep schema-impacting changes explicit and synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
