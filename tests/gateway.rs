//! End-to-end gateway tests against an in-process stub RPC endpoint.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use shoplink::{Gateway, GatewayConfig, GatewayError, Role, ShopService};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub endpoint observed about the last request.
#[derive(Clone, Default)]
struct Seen {
    sql: Arc<Mutex<Option<String>>>,
    apikey: Arc<Mutex<Option<String>>>,
    authorization: Arc<Mutex<Option<String>>>,
    prefer: Arc<Mutex<Option<String>>>,
}

impl Seen {
    fn sql(&self) -> String {
        self.sql.lock().unwrap().clone().unwrap_or_default()
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Serve `/rest/v1/rpc/exec_sql` answering every call with the given status
/// and body; returns the base origin and the observation handle.
async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Seen) {
    let seen = Seen::default();
    let observed = seen.clone();
    let app = Router::new().route(
        "/rest/v1/rpc/exec_sql",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let seen = observed.clone();
            let reply = reply.clone();
            async move {
                *seen.sql.lock().unwrap() =
                    body.get("sql").and_then(Value::as_str).map(String::from);
                *seen.apikey.lock().unwrap() = header_str(&headers, "apikey");
                *seen.authorization.lock().unwrap() = header_str(&headers, "authorization");
                *seen.prefer.lock().unwrap() = header_str(&headers, "prefer");
                (status, Json(reply))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

fn gateway_for(base: &str) -> Gateway {
    let config = GatewayConfig::new(base, Some("svc-key".into()), Some("anon-key".into()))
        .expect("valid config")
        .with_timeout(Duration::from_secs(5));
    Gateway::new(config).expect("gateway")
}

#[tokio::test]
async fn translates_qualifies_and_substitutes_before_sending() {
    let (base, seen) = spawn_stub(StatusCode::OK, json!([])).await;
    let gateway = gateway_for(&base);

    let outcome = gateway
        .execute(
            "SELECT * FROM products WHERE price > ? AND is_active = 1",
            &[json!(10)],
        )
        .await;

    assert!(outcome.failure.is_none());
    assert!(outcome.rows().is_empty());
    assert_eq!(
        seen.sql(),
        "SELECT * FROM public.products WHERE price > 10 AND is_active = TRUE"
    );
}

#[tokio::test]
async fn select_rows_normalize_with_id_first() {
    let reply = json!([{"name": "Alice", "id": "u1"}]);
    let (base, _) = spawn_stub(StatusCode::OK, reply).await;
    let gateway = gateway_for(&base);

    let outcome = gateway.execute("SELECT name, id FROM users", &[]).await;
    assert_eq!(outcome.rows(), &[vec![json!("u1"), json!("Alice")]]);
}

#[tokio::test]
async fn wrapped_payload_is_unwrapped() {
    let reply = json!([{"exec_sql": [{"id": "u1", "name": "Alice"}]}]);
    let (base, _) = spawn_stub(StatusCode::OK, reply).await;
    let gateway = gateway_for(&base);

    let outcome = gateway.execute("SELECT id, name FROM users", &[]).await;
    assert_eq!(outcome.rows(), &[vec![json!("u1"), json!("Alice")]]);
}

#[tokio::test]
async fn http_500_on_update_yields_error_report_with_cause() {
    let (base, _) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"message": "boom"})).await;
    let gateway = gateway_for(&base);

    let outcome = gateway
        .execute("UPDATE orders SET status = ? WHERE id = ?", &[json!("paid"), json!("o1")])
        .await;

    let report = outcome.write().expect("write report");
    assert_eq!(report.error.as_deref(), Some("http 500"));
    assert!(report.details.as_deref().unwrap_or_default().contains("boom"));
    assert!(matches!(
        outcome.failure,
        Some(GatewayError::Response { status: 500, .. })
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure_with_benign_default() {
    // claim a port, then free it so the connection is refused
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let gateway = gateway_for(&base);

    let read = gateway.execute("SELECT * FROM users", &[]).await;
    assert!(read.rows().is_empty());
    assert!(matches!(read.failure, Some(GatewayError::Transport(_))));

    let write = gateway.execute("DELETE FROM cart WHERE id = ?", &[json!("c1")]).await;
    let report = write.write().expect("write report");
    assert!(!report.is_ok());
}

#[tokio::test]
async fn headers_follow_the_wire_contract() {
    let (base, seen) = spawn_stub(StatusCode::OK, json!([])).await;
    let gateway = gateway_for(&base);

    gateway.execute("SELECT 1", &[]).await;
    assert_eq!(seen.apikey.lock().unwrap().as_deref(), Some("svc-key"));
    assert_eq!(
        seen.authorization.lock().unwrap().as_deref(),
        Some("Bearer svc-key")
    );
    assert_eq!(
        seen.prefer.lock().unwrap().as_deref(),
        Some("return=representation")
    );

    gateway
        .execute_as("SELECT 1", &[], Role::Anon, Duration::from_secs(5))
        .await;
    assert_eq!(seen.apikey.lock().unwrap().as_deref(), Some("anon-key"));
}

#[tokio::test]
async fn shop_service_reshapes_rows_into_records() {
    let reply = json!([{
        "id": "u1",
        "telegram_id": 42,
        "name": "Alice",
        "phone": null,
        "email": null,
        "language": "en",
        "is_admin": false,
        "created_at": "2024-01-01T00:00:00Z",
        "is_registered": true
    }]);
    let (base, seen) = spawn_stub(StatusCode::OK, reply).await;
    let service = ShopService::new(gateway_for(&base));

    let user = service.user_by_telegram_id(42).await.expect("user");
    assert_eq!(user.id, "u1");
    assert_eq!(user.language, "en");
    assert!(user.is_registered);
    assert!(seen.sql().contains("FROM public.users WHERE telegram_id = 42"));
}

#[tokio::test]
async fn write_row_count_passes_through() {
    let (base, _) = spawn_stub(StatusCode::OK, json!({"row_count": 2})).await;
    let gateway = gateway_for(&base);

    let outcome = gateway
        .execute("UPDATE notifications SET is_read = 1 WHERE user_id = ?", &[json!("u1")])
        .await;
    let report = outcome.write().expect("write report");
    assert_eq!(report.row_count, Some(2));
    assert!(report.is_ok());
}
