//! Domain model for lists, tasks and display preferences.
//!
//! # Responsibility
//! - Define canonical records shared by storage, ordering and UI layers.
//! - Keep the persisted JSON shape stable (`camelCase` field names).
//!
//! # Invariants
//! - Every task references its owning list through `list_id`.
//! - Timestamps are stored as RFC 3339 text and parsed leniently on read.

pub mod list;
pub mod task;
pub mod theme;
pub mod timestamp;
