use crate::core::types::MemberStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub total_subscribers: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListsPage {
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub total_items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub email_address: String,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Active,
    Inactive,
}

/// Tag change sent to `POST /lists/{list_id}/members/{subscriber_hash}/tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTag {
    pub name: String,
    pub status: TagStatus,
}

impl MemberTag {
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Active,
        }
    }

    pub fn inactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Inactive,
        }
    }
}

/// Body format of a campaign test email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendType {
    Html,
    Plaintext,
}
