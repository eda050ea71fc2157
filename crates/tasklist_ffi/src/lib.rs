//! Flutter-facing bindings for the task lists core.

pub mod api;
