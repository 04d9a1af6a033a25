use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use todo_shared::dto::{LoginRequest, LoginResponse, TaskCreate, TaskUpdate};

use super::{ApiClient, RequestOptions};
use crate::domain::{Task, TaskStatistics};
use crate::error::ClientError;
use crate::ports::{
    HttpRequest, HttpResponse, HttpTransport, Method, Navigator, StorageError, TokenStorage,
    TransportError,
};
use crate::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Session};

const BASE: &str = "http://api.test";

/// Transport answering from a queue and recording every request.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn reply(self, status: u16, status_text: &str, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, status_text, body)));
        self
    }

    fn fail(self, error: TransportError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    fn last(&self) -> HttpRequest {
        self.sent.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request")
    }
}

#[derive(Default)]
struct MapStorage(Mutex<HashMap<String, String>>);

impl TokenStorage for MapStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
struct Visits(Mutex<Vec<String>>);

impl Navigator for Visits {
    fn navigate(&self, route: &str) {
        self.0.lock().unwrap().push(route.to_string());
    }
}

struct Harness {
    client: ApiClient,
    transport: Arc<ScriptedTransport>,
    storage: Arc<MapStorage>,
    visits: Arc<Visits>,
}

fn harness(transport: ScriptedTransport, token: Option<&str>) -> Harness {
    let transport = Arc::new(transport);
    let storage = Arc::new(MapStorage::default());
    let visits = Arc::new(Visits::default());
    if let Some(t) = token {
        storage.set(ACCESS_TOKEN_KEY, t).unwrap();
        storage.set(REFRESH_TOKEN_KEY, "refresh").unwrap();
    }
    let session = Session::browser(storage.clone(), visits.clone());
    Harness {
        client: ApiClient::new(BASE, transport.clone(), session),
        transport,
        storage,
        visits,
    }
}

fn task_json() -> serde_json::Value {
    json!({
        "id": 1,
        "title": "Buy milk",
        "description": null,
        "completed": false,
        "user_id": "u1",
        "created_at": "t",
        "updated_at": "t"
    })
}

#[tokio::test]
async fn test_create_task_returns_body_unchanged() {
    let h = harness(
        ScriptedTransport::default().reply(201, "Created", &task_json().to_string()),
        Some("abc"),
    );

    let task = h.client.create_task(&TaskCreate::new("Buy milk")).await.unwrap();

    let sent = h.transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://api.test/tasks/");
    assert_eq!(sent.body.as_deref(), Some(r#"{"title":"Buy milk"}"#));
    assert_eq!(serde_json::to_value(&task).unwrap(), task_json());
    assert_eq!(task.user_id, "u1");
}

#[tokio::test]
async fn test_delete_204_skips_body_parsing() {
    let h = harness(
        ScriptedTransport::default().reply(204, "No Content", "not json at all"),
        Some("abc"),
    );

    h.client.delete_task(1).await.unwrap();

    let sent = h.transport.last();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url, "http://api.test/tasks/1");
}

#[tokio::test]
async fn test_request_204_yields_none() {
    let h = harness(
        ScriptedTransport::default().reply(204, "No Content", r#"{"id":1}"#),
        None,
    );
    let value: Option<serde_json::Value> = h
        .client
        .request("/tasks/1", RequestOptions::get())
        .await
        .unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn test_login_401_clears_session_and_redirects() {
    let h = harness(
        ScriptedTransport::default().reply(401, "Unauthorized", r#"{"detail":"bad credentials"}"#),
        Some("stale"),
    );

    let err = h
        .client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "bad credentials");
    assert_eq!(err.status(), Some(401));
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(h.storage.get(REFRESH_TOKEN_KEY), None);
    assert_eq!(*h.visits.0.lock().unwrap(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_403_without_body_uses_generic_message() {
    let h = harness(
        ScriptedTransport::default().reply(403, "Forbidden", ""),
        Some("abc"),
    );

    let err = h.client.list_tasks().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized { status: 403, .. }));
    assert_eq!(err.to_string(), super::AUTH_FAILED_MESSAGE);
    assert!(!h.client.is_authenticated());
    assert_eq!(h.visits.0.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_custom_sign_in_route() {
    let transport = Arc::new(ScriptedTransport::default().reply(401, "Unauthorized", "{}"));
    let visits = Arc::new(Visits::default());
    let session = Session::browser(Arc::new(MapStorage::default()), visits.clone())
        .with_sign_in_route("/auth/signin");
    let client = ApiClient::new(BASE, transport, session);

    client.task_statistics().await.unwrap_err();

    assert_eq!(*visits.0.lock().unwrap(), vec!["/auth/signin".to_string()]);
}

#[tokio::test]
async fn test_500_keeps_session() {
    let h = harness(
        ScriptedTransport::default().reply(500, "Internal Server Error", "<html>oops</html>"),
        Some("abc"),
    );

    let err = h.client.get_task(7).await.unwrap_err();

    assert!(matches!(err, ClientError::Http { status: 500, .. }));
    assert_eq!(
        err.to_string(),
        "Request failed with status 500 Internal Server Error"
    );
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("abc"));
    assert!(h.visits.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_error_prefers_server_detail() {
    let h = harness(
        ScriptedTransport::default().reply(404, "Not Found", r#"{"detail":"Task not found"}"#),
        Some("abc"),
    );

    let err = h.client.get_task(99).await.unwrap_err();

    assert_eq!(err.to_string(), "Task not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_stored() {
    let h = harness(ScriptedTransport::default().reply(200, "OK", "[]"), Some("abc"));

    let tasks = h.client.list_tasks().await.unwrap();

    assert!(tasks.is_empty());
    let sent = h.transport.last();
    assert_eq!(sent.headers.get("Authorization"), Some("Bearer abc"));
    assert_eq!(sent.headers.get("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_no_bearer_header_without_token() {
    let h = harness(ScriptedTransport::default().reply(200, "OK", "[]"), None);

    h.client.list_tasks().await.unwrap();

    assert_eq!(h.transport.last().headers.get("Authorization"), None);
}

#[tokio::test]
async fn test_empty_stored_token_sends_no_bearer_header() {
    let h = harness(ScriptedTransport::default().reply(200, "OK", "[]"), Some(""));

    h.client.list_tasks().await.unwrap();

    assert!(!h.client.is_authenticated());
    assert_eq!(h.transport.last().headers.get("Authorization"), None);
}

#[tokio::test]
async fn test_detached_session_is_anonymous() {
    let transport = Arc::new(
        ScriptedTransport::default()
            .reply(200, "OK", "[]")
            .reply(401, "Unauthorized", r#"{"detail":"nope"}"#),
    );
    let visits = Arc::new(Visits::default());
    let client = ApiClient::new(BASE, transport.clone(), Session::detached(visits.clone()));

    assert!(!client.is_authenticated());
    client.list_tasks().await.unwrap();
    assert_eq!(transport.last().headers.get("Authorization"), None);

    let err = client.list_tasks().await.unwrap_err();
    assert_eq!(err.to_string(), "nope");
    assert_eq!(visits.0.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_caller_headers_override_defaults() {
    let h = harness(ScriptedTransport::default().reply(200, "OK", "{}"), Some("abc"));

    let _: Option<serde_json::Value> = h
        .client
        .request(
            "/tasks/",
            RequestOptions::get()
                .header("authorization", "Bearer other")
                .header("Content-Type", "text/plain")
                .header("X-Request-Id", "r1"),
        )
        .await
        .unwrap();

    let headers = h.transport.last().headers;
    assert_eq!(headers.len(), 3);
    assert_eq!(headers.get("Authorization"), Some("Bearer other"));
    assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    assert_eq!(headers.get("x-request-id"), Some("r1"));
}

#[tokio::test]
async fn test_update_and_toggle_bodies() {
    let h = harness(
        ScriptedTransport::default()
            .reply(200, "OK", &task_json().to_string())
            .reply(200, "OK", &task_json().to_string()),
        Some("abc"),
    );

    let update = TaskUpdate {
        title: Some("Buy oat milk".to_string()),
        ..Default::default()
    };
    h.client.update_task(1, &update).await.unwrap();
    let sent = h.transport.last();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, "http://api.test/tasks/1");
    assert_eq!(sent.body.as_deref(), Some(r#"{"title":"Buy oat milk"}"#));

    h.client.toggle_task_completion(5, true).await.unwrap();
    let sent = h.transport.last();
    assert_eq!(sent.method, Method::Patch);
    assert_eq!(sent.url, "http://api.test/tasks/5/complete");
    assert_eq!(sent.body.as_deref(), Some(r#"{"completed":true}"#));
}

#[tokio::test]
async fn test_statistics() {
    let h = harness(
        ScriptedTransport::default().reply(200, "OK", r#"{"total":3,"pending":1,"completed":2}"#),
        Some("abc"),
    );

    let stats = h.client.task_statistics().await.unwrap();

    assert_eq!(
        stats,
        TaskStatistics {
            total: 3,
            pending: 1,
            completed: 2
        }
    );
    assert_eq!(h.transport.last().url, "http://api.test/tasks/statistics");
}

#[tokio::test]
async fn test_login_does_not_persist_tokens() {
    let body = r#"{"access_token":"new","refresh_token":"r","token_type":"bearer"}"#;
    let h = harness(ScriptedTransport::default().reply(200, "OK", body), None);

    let tokens = h
        .client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        tokens,
        LoginResponse {
            access_token: "new".to_string(),
            refresh_token: "r".to_string(),
            token_type: "bearer".to_string(),
        }
    );
    assert!(!h.client.is_authenticated());

    h.client.session().persist(&tokens).unwrap();
    assert!(h.client.is_authenticated());
    assert_eq!(h.client.session().refresh_token().as_deref(), Some("r"));
}

#[tokio::test]
async fn test_logout_clears_without_server_call() {
    let h = harness(ScriptedTransport::default(), Some("abc"));
    assert!(h.client.is_authenticated());

    h.client.logout();

    assert!(!h.client.is_authenticated());
    assert_eq!(h.storage.get(REFRESH_TOKEN_KEY), None);
    assert!(h.transport.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_error_propagates_untouched() {
    let h = harness(
        ScriptedTransport::default().fail(TransportError::Connection("refused".to_string())),
        Some("abc"),
    );

    let err = h.client.list_tasks().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(TransportError::Connection(_))));
    assert!(h.client.is_authenticated());
    assert!(h.visits.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mismatched_success_body_is_decode_error() {
    let h = harness(
        ScriptedTransport::default().reply(200, "OK", r#"{"unexpected":true}"#),
        Some("abc"),
    );

    let err = h.client.get_task(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_base_url_trailing_slash_trimmed() {
    let transport = Arc::new(ScriptedTransport::default().reply(200, "OK", "[]"));
    let client = ApiClient::new(
        "http://api.test/",
        transport.clone(),
        Session::detached(Arc::new(Visits::default())),
    );

    let tasks: Vec<Task> = client.list_tasks().await.unwrap();

    assert!(tasks.is_empty());
    assert_eq!(client.base_url(), "http://api.test");
    assert_eq!(transport.last().url, "http://api.test/tasks/");
}
