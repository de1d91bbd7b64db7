use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A portfolio project shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Project {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub image_url: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Project {
    /// Identifier for admin actions; empty when the backend omitted it.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}
