use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A newsletter subscriber (admin view, also returned by signup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Subscriber {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub subscribed_at: Option<NaiveDateTime>,
}

/// Body of `POST /newsletter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSignup {
    pub email: String,
}
