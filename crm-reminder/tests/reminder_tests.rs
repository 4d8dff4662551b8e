use httpmock::prelude::*;
use serde_json::json;

use crm_reminder::reminder::send_order_reminders;

#[tokio::test]
async fn test_reminder_lines_appended_for_recent_orders() {
    let server = MockServer::start();

    let order_id = "8d6f1c0e-55aa-4b2e-9f3d-0c5a6f1b2d3e";
    let orders_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/orders")
            .query_param_exists("since");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([
                {
                    "id": order_id,
                    "customer": {"email": "ada@example.com"},
                    "total_amount": "9.99"
                }
            ]));
    });

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("order_reminders_log.txt");

    send_order_reminders(&server.base_url(), log_path.to_str().unwrap())
        .await
        .unwrap();

    orders_mock.assert();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains(&format!("Reminder for Order ID {}", order_id)));
    assert!(contents.contains("Customer: ada@example.com"));
}

#[tokio::test]
async fn test_error_line_on_failed_fetch() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/orders");
        then.status(500);
    });

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("order_reminders_log.txt");

    send_order_reminders(&server.base_url(), log_path.to_str().unwrap())
        .await
        .unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("ERROR: Failed to fetch orders. Status: 500"));
}

#[tokio::test]
async fn test_no_orders_appends_nothing() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/orders");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([]));
    });

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("order_reminders_log.txt");

    send_order_reminders(&server.base_url(), log_path.to_str().unwrap())
        .await
        .unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.is_empty());
}
