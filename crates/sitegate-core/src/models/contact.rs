use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A stored contact form submission (admin view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Contact {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub city: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ContactSubmission {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub city: String,
}
