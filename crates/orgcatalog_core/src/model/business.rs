//! Business category (activity type) model.
//!
//! Categories form a forest through the nullable `parent_id` link. Sibling
//! names are unique; removing a parent detaches its children to the root.

use serde::{Deserialize, Serialize};

/// Row identifier of a business category.
pub type BusinessId = i64;

/// Category node. `parent_id = None` marks a root category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub parent_id: Option<BusinessId>,
}

impl Business {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
