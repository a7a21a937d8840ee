use serde::{Deserialize, Serialize};

/// A staff member assignable to projects.
#[derive(Debug, Clone, Deserialize)]
pub struct Tantosha {
    #[serde(rename = "担当者ID")]
    pub id: String,
    #[serde(rename = "氏名")]
    pub name: String,
    #[serde(rename = "メールアドレス", default)]
    pub email: Option<String>,
    #[serde(rename = "SlackメンバーID", default)]
    pub slack_id: Option<String>,
}

/// Write payload for `addTantosha` / `updateTantosha`.
#[derive(Debug, Clone, Serialize)]
pub struct TantoshaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(rename = "slackId")]
    pub slack_id: String,
}

impl TantoshaPayload {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}
