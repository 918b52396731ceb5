use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A circle of people sharing expenses. Owned by its creator; membership
/// only grows, via explicit add operations.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    /// Member ids, kept sorted and deduplicated.
    pub members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.binary_search(&user_id).is_ok()
    }
}
