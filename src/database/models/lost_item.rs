use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LostItem {
    pub id: Uuid,
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub date_lost: DateTime<Utc>,
    pub contact_number: String,
    pub email: String,
    pub image: String,
    /// Reporter; the only user allowed to change or remove the report
    pub reported_by: Uuid,
    pub is_found: bool,
    pub created_at: DateTime<Utc>,
}
