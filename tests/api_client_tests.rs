//! Integration tests for the sheet API client using a wiremock server.

use nouki_alert::api::{ApiClient, ApiOutcome};
use nouki_alert::models::{Anken, AnkenPayload, DashboardData, Tantosha};
use nouki_alert::ui::toast::{self, ToastKind, ToastReceiver};

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(uri: &str) -> (ApiClient, ToastReceiver) {
    let (tx, rx) = toast::channel();
    (ApiClient::new(uri, tx).unwrap(), rx)
}

fn sample_anken_json() -> serde_json::Value {
    json!({
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
    })
}

#[tokio::test]
async fn anken_list_sends_only_active_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("action", "getAnkenList"))
        .and(query_param("status", "進行中"))
        .and(query_param_is_missing("tantosha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [sample_anken_json()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client(&server.uri());
    let outcome: ApiOutcome<Vec<Anken>> = client.get_anken_list(Some("進行中"), None).await;

    let rows = outcome.success().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "A1");
    assert_eq!(rows[0].days_remaining, -2);
}

#[tokio::test]
async fn anken_list_omits_both_filters_when_unset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getAnkenList"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("tantosha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client(&server.uri());
    let outcome = client.get_anken_list(None, None).await;

    assert!(outcome.success().unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_decodes_stats_and_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getDashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "stats": { "total": 12, "overdue": 2, "dueThisWeek": 3, "waiting": 4 },
                "overdueList": [sample_anken_json()],
                "thisWeekList": []
            }
        })))
        .mount(&server)
        .await;

    let (client, _rx) = client(&server.uri());
    let data: DashboardData = client.get_dashboard().await.success().unwrap();

    assert_eq!(data.stats.total, 12);
    assert_eq!(data.stats.due_this_week, 3);
    assert_eq!(data.overdue_list.len(), 1);
    assert!(data.this_week_list.is_empty());
}

#[tokio::test]
async fn single_anken_fetch_passes_the_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getAnken"))
        .and(query_param("id", "A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": sample_anken_json()
        })))
        .mount(&server)
        .await;

    let (client, _rx) = client(&server.uri());
    let anken = client.get_anken("A1").await.success().unwrap();
    assert_eq!(anken.name, "LPリニューアル");
}

#[tokio::test]
async fn tantosha_list_decodes_optional_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getTantoshaList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "担当者ID": "T1", "氏名": "田中", "メールアドレス": "t@example.com", "SlackメンバーID": null },
                { "担当者ID": "T2", "氏名": "鈴木" }
            ]
        })))
        .mount(&server)
        .await;

    let (client, _rx) = client(&server.uri());
    let list: Vec<Tantosha> = client.get_tantosha_list().await.success().unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].email.as_deref(), Some("t@example.com"));
    assert!(list[1].email.is_none());
}

#[tokio::test]
async fn server_reported_failure_carries_the_message_without_a_toast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getAnken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "anken not found"
        })))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server.uri());
    let outcome = client.get_anken("missing").await;

    match outcome {
        ApiOutcome::Failure(message) => assert_eq!(message, "anken not found"),
        ApiOutcome::Success(_) => panic!("expected failure"),
    }
    assert!(rx.try_recv().is_err(), "server-side failures must not toast");
}

#[tokio::test]
async fn unreachable_server_fails_the_read_and_toasts() {
    // Nothing listens here; the dispatch itself fails.
    let (client, mut rx) = client("http://127.0.0.1:9/");

    let outcome: ApiOutcome<Vec<Anken>> = client.get_anken_list(None, None).await;

    assert!(matches!(outcome, ApiOutcome::Failure(_)));
    let toast = rx.try_recv().expect("an error toast should be queued");
    assert_eq!(toast.kind, ToastKind::Error);
}

fn sample_payload() -> AnkenPayload {
    AnkenPayload {
        id: None,
        anken_name: "LP".into(),
        client_name: "Foo".into(),
        tantosha: "田中".into(),
        jutyu_date: "2024-01-05".into(),
        deadline: "2024-02-01".into(),
        status: "未着手".into(),
        priority: "中".into(),
        memo: String::new(),
    }
}

#[tokio::test]
async fn writes_carry_the_action_in_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "action": "addAnken",
            "ankenName": "LP",
            "tantosha": "田中"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client(&server.uri());
    let outcome = client.add_anken(&sample_payload()).await;
    assert!(matches!(outcome, ApiOutcome::Success(())));
}

#[tokio::test]
async fn write_succeeds_even_when_the_server_rejects_it() {
    // The response of a write is never read, so an HTTP error or garbage
    // body still counts as a dispatched, and therefore successful, write.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not even json"))
        .mount(&server)
        .await;

    let (client, mut rx) = client(&server.uri());
    let mut payload = sample_payload();
    payload.id = Some("A1".into());
    let outcome = client.update_anken(&payload).await;

    assert!(matches!(outcome, ApiOutcome::Success(())));
    assert!(rx.try_recv().is_err(), "a dispatched write must not toast");
}

#[tokio::test]
async fn write_fails_only_when_dispatch_fails() {
    let (client, mut rx) = client("http://127.0.0.1:9/");

    let outcome = client.add_anken(&sample_payload()).await;

    assert!(matches!(outcome, ApiOutcome::Failure(_)));
    let toast = rx.try_recv().expect("an error toast should be queued");
    assert_eq!(toast.kind, ToastKind::Error);
}
