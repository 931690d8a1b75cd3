use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item condition; labels are matched exactly, case included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Like New")]
    LikeNew,
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::LikeNew,
        Condition::Excellent,
        Condition::VeryGood,
        Condition::Good,
        Condition::Fair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::LikeNew => "Like New",
            Condition::Excellent => "Excellent",
            Condition::VeryGood => "Very Good",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// Seller details copied onto the listing when it is created.
/// Display data only; `user_id` is the ownership reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSnapshot {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub year: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub condition: Condition,
    pub description: String,
    pub image: String,
    pub owner: OwnerSnapshot,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}
