use serde::{Deserialize, Serialize};

/// Status vocabulary of the sheet. Values travel as opaque strings; this
/// set only feeds the form and filter selectors, unknown values are still
/// rendered as-is.
pub const STATUS_OPTIONS: [&str; 4] = ["未着手", "進行中", "納品待ち", "完了"];

pub const PRIORITY_OPTIONS: [&str; 3] = ["高", "中", "低"];

/// A tracked project. Field keys are the sheet's Japanese column headers.
///
/// `tantosha` carries an assignee's display name, not an id; the sheet
/// denormalizes that way and this client does not enforce the reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Anken {
    #[serde(rename = "案件ID")]
    pub id: String,
    #[serde(rename = "案件名")]
    pub name: String,
    #[serde(rename = "クライアント名", default)]
    pub client_name: String,
    #[serde(rename = "担当者", default)]
    pub tantosha: String,
    #[serde(rename = "受注日", default)]
    pub order_date: String,
    #[serde(rename = "納期", default)]
    pub deadline: String,
    /// Server-computed, negative once the deadline has passed.
    #[serde(rename = "残り日数", default)]
    pub days_remaining: i64,
    #[serde(rename = "ステータス", default)]
    pub status: String,
    #[serde(rename = "優先度", default)]
    pub priority: String,
    #[serde(rename = "備考", default)]
    pub memo: Option<String>,
}

/// Write payload for `addAnken` / `updateAnken`. The id is present only
/// for updates; an absent id tells the server to assign one.
#[derive(Debug, Clone, Serialize)]
pub struct AnkenPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "ankenName")]
    pub anken_name: String,
    #[serde(rename = "clientName")]
    pub client_name: String,
    pub tantosha: String,
    #[serde(rename = "jutyuDate")]
    pub jutyu_date: String,
    pub deadline: String,
    pub status: String,
    pub priority: String,
    pub memo: String,
}

impl AnkenPayload {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sheet_columns() {
        let anken: Anken = serde_json::from_value(serde_json::json!({
            "案件ID": "A1",
            "案件名": "LPリニューアル",
            "クライアント名": "株式会社Foo",
            "担当者": "田中",
            "受注日": "2024-01-05T00:00:00.000Z",
            "納期": "2024-02-01",
            "残り日数": -2,
            "ステータス": "進行中",
            "優先度": "高",
            "備考": null
        }))
        .unwrap();

        assert_eq!(anken.id, "A1");
        assert_eq!(anken.days_remaining, -2);
        assert!(anken.memo.is_none());
    }

    #[test]
    fn create_payload_omits_the_id() {
        let payload = AnkenPayload {
            id: None,
            anken_name: "LP".into(),
            client_name: "Foo".into(),
            tantosha: "田中".into(),
            jutyu_date: "2024-01-05".into(),
            deadline: "2024-02-01".into(),
            status: "未着手".into(),
            priority: "中".into(),
            memo: String::new(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["ankenName"], "LP");
        assert_eq!(value["jutyuDate"], "2024-01-05");
    }
}
