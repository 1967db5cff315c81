//! Catalog domain model.
//!
//! # Responsibility
//! - Define plain value records for buildings, organizations, phones and
//!   business categories.
//! - Keep relations as flat id references owned by the data-access layer.
//!
//! # Invariants
//! - Records are read-only snapshots; nothing in core mutates persisted rows
//!   outside the seed loader.

pub mod building;
pub mod business;
pub mod organization;
