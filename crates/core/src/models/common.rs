use crate::field_rules::int_bool;
use serde::{Deserialize, Serialize};

/// User profile attached to extended responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub screen_name: Option<String>,
    pub photo_100: Option<String>,
}

/// Community attached to extended responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub screen_name: Option<String>,
    #[serde(default, with = "int_bool")]
    pub is_closed: bool,
    pub photo_100: Option<String>,
}

/// `{count, can_post}` style counter block on posts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub count: u64,
    #[serde(default, with = "int_bool")]
    pub can_post: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Likes {
    #[serde(default)]
    pub count: u64,
    #[serde(default, with = "int_bool")]
    pub user_likes: bool,
    #[serde(default, with = "int_bool")]
    pub can_like: bool,
}
