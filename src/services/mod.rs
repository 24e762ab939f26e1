//! Service layer containing widget behavior and side-effect helpers.
//!
//! ## Service map
//! - `card_filter.rs` — card matching, visible counts, no-results panel.
//! - `condition.rs` — role/position condition parsing and evaluation.
//! - `roles.rs` — role button activation and row visibility counters.
//! - `search.rs` — index lifecycle, substring matching, result panels.
//! - `render.rs` — HTML/text result rendering and escaping.
//! - `debounce.rs` — quiet-period coalescing of input events.
//! - `page.rs` — page snapshot loading.
//! - `settings.rs` — config file loading and defaults.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod card_filter;
pub mod condition;
pub mod debounce;
pub mod output;
pub mod page;
pub mod render;
pub mod roles;
pub mod search;
pub mod settings;
