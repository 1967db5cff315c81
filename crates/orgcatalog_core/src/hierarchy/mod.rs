//! Business category hierarchy queries.
//!
//! # Responsibility
//! - Expand a category id into the id set used as an organization filter.
//!
//! # Invariants
//! - Traversal depth is fixed; categories nested deeper than
//!   [`CLOSURE_DEPTH`] levels below the root are not included.

pub mod closure;

pub use closure::{category_subtree_ids, ChildFetcher, ParentIndex, CLOSURE_DEPTH};
