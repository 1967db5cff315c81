//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and the geo/hierarchy core into
//!   use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod catalog_service;
