use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A client testimonial shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Client {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub designation: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Client {
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// "Name, Designation" as displayed under a testimonial
    pub fn byline(&self) -> String {
        if self.designation.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.designation)
        }
    }
}
