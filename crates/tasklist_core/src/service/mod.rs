//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into screen-level APIs.
//! - Keep UI/FFI layers decoupled from storage and ordering details.

pub mod overview;
pub mod task_service;
