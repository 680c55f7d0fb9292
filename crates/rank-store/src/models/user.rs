//! Identity and admin rows

use serde::Deserialize;
use serde_json::Value;

/// Row of `{id}_users.json` or `{id}_admins.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRow {
    #[serde(default, alias = "id")]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Full name as exported by the admin listing
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}
