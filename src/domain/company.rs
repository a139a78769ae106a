//! Company profile domain model.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// An employer profile listed on the companies page.
///
/// `open_positions` is denormalized in the fixtures and not recomputed from
/// the job list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "Id", default)]
    pub id: EntityId,
    pub name: String,
    pub industry: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub open_positions: u32,
}
