//! Repository layer over key-value storage.
//!
//! # Responsibility
//! - Map lists, tasks and theme to their well-known storage keys.
//! - Keep JSON encoding details out of the service layer.
//!
//! # Invariants
//! - A key that was never written loads as an empty collection or default.
//! - Stored JSON that fails to decode is an error, never silently dropped.

pub mod task_repo;
