//! Organization, phone, and hydrated organization read models.
//!
//! # Responsibility
//! - Keep relation ids flat (`building_id`, `organization_id`) so the core
//!   never walks live object graphs.
//! - Define the response shape assembled by the catalog service.
//!
//! # Invariants
//! - Every organization references exactly one building.
//! - `(number, organization_id)` is unique among phones.

use crate::model::building::{Building, BuildingId};
use crate::model::business::Business;
use serde::{Deserialize, Serialize};

/// Row identifier of an organization.
pub type OrganizationId = i64;

/// Row identifier of a phone record.
pub type PhoneId = i64;

/// Flat organization row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
}

impl Organization {
    /// Returns true when `needle` (already lowercased) occurs in the name,
    /// comparing with Unicode-aware lowercase.
    pub fn name_contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// Flat phone row. `number` is stored verbatim, without normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    pub number: String,
    pub organization_id: OrganizationId,
}

/// Phone projection exposed in organization responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
}

/// Organization with its building, phones and category tags loaded.
///
/// Serialized as `{id, name, phones, businesses, building}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDetails {
    pub id: OrganizationId,
    pub name: String,
    pub phones: Vec<PhoneNumber>,
    pub businesses: Vec<Business>,
    pub building: Building,
}
