//! `HttpBackend` against a throwaway hyper server on a loopback port.

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use dashboard::api::{ApiError, Backend, HttpBackend};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::AUTHORIZATION;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use serde_json::{Value, json};
use shared::types::{
    Exam, ExamDraft, LoginData, SendOtpRequest, UserType, VerifyOtpRequest,
};
use tokio::net::TcpListener;

fn reply(status: StatusCode, body: Value) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response
}

/// Routes the backend tests need, shaped like the real API.
async fn api(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let auth = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let req_query = req.uri().query().map(str::to_string);
    let body = req
        .into_body()
        .collect()
        .await
        .map(|b| b.to_bytes())
        .unwrap_or_default();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let authorized = auth.as_deref() == Some("Bearer good-token");

    let response = match (method, path.as_str()) {
        (Method::POST, "/admin/login") if body["password"] == "secret" => reply(
            StatusCode::OK,
            json!({
                "accessToken": "a.b.c",
                "admin": {"id": 1, "full_name": "Root", "email": body["email"], "role": "superadmin"}
            }),
        ),
        (Method::POST, "/admin/login") => reply(
            StatusCode::UNAUTHORIZED,
            json!({"status": "error", "message": "Invalid email or password"}),
        ),
        (Method::POST, "/client/send-otp") => reply(StatusCode::OK, json!({"status": "success"})),
        (Method::POST, "/client/verify-otp") => reply(
            StatusCode::BAD_REQUEST,
            json!({"error": "Code expired"}),
        ),
        (_, _) if !authorized => reply(StatusCode::UNAUTHORIZED, json!({})),
        (Method::GET, "/exams") if req_query.is_some() => reply(
            StatusCode::BAD_REQUEST,
            json!({"message": "Unexpected query string"}),
        ),
        (Method::GET, "/exams") => reply(
            StatusCode::OK,
            json!({"status": "success", "data": [{"id": 1, "title": "Mock"}, {"id": 2, "title": "B2"}]}),
        ),
        (Method::POST, "/exams") => reply(
            StatusCode::CREATED,
            json!({"id": 9, "title": body["title"], "description": body["description"]}),
        ),
        (Method::DELETE, "/exams/9") => reply(StatusCode::NO_CONTENT, Value::Null),
        _ => reply(StatusCode::NOT_FOUND, json!({"message": "No such route"})),
    };

    Ok(response)
}

async fn spawn_api() -> SocketAddr {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let io = TokioIo::new(stream);
            tokio::task::spawn(async move {
                let _ = http1::Builder::new()
                    .timer(TokioTimer::new())
                    .serve_connection(io, service_fn(api))
                    .await;
            });
        }
    });

    addr
}

async fn backend() -> HttpBackend {
    let addr = spawn_api().await;
    HttpBackend::new(&format!("http://{}/", addr))
}

#[tokio::test]
async fn login_decodes_aliased_fields() {
    let backend = backend().await;
    let payload = backend
        .login(UserType::Admin, &LoginData::new("root@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(payload.access_token, "a.b.c");
    assert_eq!(payload.profile["role"], "superadmin");
    assert_eq!(payload.profile["email"], "root@example.com");
}

#[tokio::test]
async fn login_failure_carries_server_message() {
    let backend = backend().await;
    let err = backend
        .login(UserType::Admin, &LoginData::new("root@example.com", "wrong"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn list_unwraps_data_envelope() {
    let backend = backend().await;
    let exams: Vec<Exam> = backend.list("good-token").await.unwrap();
    assert_eq!(exams.len(), 2);
    assert_eq!(exams[0].title, "Mock");
}

#[tokio::test]
async fn missing_bearer_is_rejected_without_message() {
    let backend = backend().await;
    let err = backend.list::<Exam>("bad-token").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Status {
            status: 401,
            message: None
        }
    ));
    assert_eq!(err.user_message(), dashboard::api::GENERIC_ERROR);
}

#[tokio::test]
async fn create_and_delete_round_trip_through_routes() {
    let backend = backend().await;
    let exam: Exam = backend
        .create(
            "good-token",
            &ExamDraft {
                title: "Listening".into(),
                description: "Part 1".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(exam.id, 9);
    assert_eq!(exam.description, "Part 1");
    backend.delete::<Exam>("good-token", 9).await.unwrap();
}

#[tokio::test]
async fn reset_endpoints_use_the_user_type_prefix() {
    let backend = backend().await;
    backend
        .send_otp(
            UserType::Client,
            &SendOtpRequest {
                email: "c@example.com".into(),
            },
        )
        .await
        .unwrap();

    let err = backend
        .verify_otp_and_reset(
            UserType::Client,
            &VerifyOtpRequest {
                email: "c@example.com".into(),
                code: "123456".into(),
                new_password: "abcde".into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.user_message(), "Code expired");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let backend = HttpBackend::new("http://127.0.0.1:1");
    let err = backend.list::<Exam>("good-token").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn https_base_url_reaches_the_server() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (seen_tx, seen_rx) = tokio::sync::oneshot::channel();

    // Accept one connection and hang up: the TLS handshake fails, but only
    // after the client has actually dialled out.
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            drop(stream);
            let _ = seen_tx.send(());
        }
    });

    let backend = HttpBackend::new(&format!("https://{}", addr));
    let err = backend.list::<Exam>("good-token").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));

    tokio::time::timeout(std::time::Duration::from_secs(5), seen_rx)
        .await
        .expect("https request never reached the listener")
        .unwrap();
}
