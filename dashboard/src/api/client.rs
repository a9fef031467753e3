use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use http::{Method, Request, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::types::{
    Entity, ErrorResponse, LoginData, LoginPayload, SendOtpRequest, UserType, VerifyOtpRequest,
};
use tracing::{debug, warn};

use crate::api::{ApiError, Backend};

/// JSON-over-HTTP implementation of [`Backend`].
///
/// Speaks both `http://` and `https://` (rustls, webpki roots). No timeout or
/// retry is applied here; a request runs until the connection gives up.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<Request<Full<Bytes>>, ApiError> {
        let uri: Uri = format!("{}{}", self.base_url, path)
            .parse()
            .map_err(|e| ApiError::Request(format!("bad uri for {}: {}", path, e)))?;

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Request(format!("unusable token: {}", e)))?;
            builder = builder.header(AUTHORIZATION, value);
        }

        builder
            .body(Full::new(Bytes::from(body.unwrap_or_default())))
            .map_err(|e| ApiError::Request(e.to_string()))
    }

    /// Send a request and return the body of a 2xx response. Non-2xx
    /// answers become [`ApiError::Status`] carrying the server's message.
    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ApiError> {
        debug!("{} {}", method, path);
        let request = self.build_request(method.clone(), path, token, body)?;

        let response = self.client.request(request).await.map_err(|e| {
            warn!("{} {} failed: {}", method, path, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            let message = ErrorResponse::message_from_body(&bytes);
            warn!(
                "{} {} answered {}: {}",
                method,
                path,
                status.as_u16(),
                message.as_deref().unwrap_or("-")
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(bytes)
    }

    async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body.map(serde_json::to_vec).transpose()?;
        let bytes = self.send(method, path, token, body).await?;
        decode_body(&bytes)
    }
}

/// Accept both a bare payload and the `{ "status": ..., "data": ... }`
/// envelope.
fn decode_body<R: DeserializeOwned>(bytes: &[u8]) -> Result<R, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    match serde_json::from_value::<R>(value.clone()) {
        Ok(parsed) => Ok(parsed),
        Err(e) => match value.get("data") {
            Some(data) => Ok(serde_json::from_value(data.clone())?),
            None => Err(e.into()),
        },
    }
}

impl Backend for HttpBackend {
    async fn login(
        &self,
        user_type: UserType,
        data: &LoginData,
    ) -> Result<LoginPayload, ApiError> {
        let path = format!("/{}/login", user_type);
        self.send_json(Method::POST, &path, None, Some(data)).await
    }

    async fn send_otp(&self, user_type: UserType, request: &SendOtpRequest) -> Result<(), ApiError> {
        let path = format!("/{}/send-otp", user_type);
        let body = serde_json::to_vec(request)?;
        self.send(Method::POST, &path, None, Some(body)).await?;
        Ok(())
    }

    async fn verify_otp_and_reset(
        &self,
        user_type: UserType,
        request: &VerifyOtpRequest,
    ) -> Result<(), ApiError> {
        let path = format!("/{}/verify-otp", user_type);
        let body = serde_json::to_vec(request)?;
        self.send(Method::POST, &path, None, Some(body)).await?;
        Ok(())
    }

    async fn confirm_password(&self, token: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::to_vec(&serde_json::json!({ "password": password }))?;
        self.send(Method::POST, "/admin/confirm-password", Some(token), Some(body))
            .await?;
        Ok(())
    }

    async fn list<T: Entity>(&self, token: &str) -> Result<Vec<T>, ApiError> {
        let path = format!("/{}", T::COLLECTION);
        self.send_json::<(), _>(Method::GET, &path, Some(token), None)
            .await
    }

    async fn create<T: Entity>(&self, token: &str, draft: &T::Draft) -> Result<T, ApiError> {
        let path = format!("/{}", T::COLLECTION);
        self.send_json(Method::POST, &path, Some(token), Some(draft))
            .await
    }

    async fn update<T: Entity>(
        &self,
        token: &str,
        id: i64,
        draft: &T::Draft,
    ) -> Result<T, ApiError> {
        let path = format!("/{}/{}", T::COLLECTION, id);
        self.send_json(Method::PUT, &path, Some(token), Some(draft))
            .await
    }

    async fn delete<T: Entity>(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let path = format!("/{}/{}", T::COLLECTION, id);
        self.send(Method::DELETE, &path, Some(token), None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::Exam;

    #[test]
    fn decode_accepts_bare_and_enveloped_lists() {
        let bare = br#"[{"id":1,"title":"Mock 1"}]"#;
        let wrapped = br#"{"status":"success","data":[{"id":1,"title":"Mock 1"}]}"#;
        let a: Vec<Exam> = decode_body(bare).unwrap();
        let b: Vec<Exam> = decode_body(wrapped).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let body = br#"{"status":"success"}"#;
        assert!(matches!(
            decode_body::<Vec<Exam>>(body),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn bearer_header_is_attached() {
        let backend = HttpBackend::new("http://127.0.0.1:9/");
        let req = backend
            .build_request(Method::GET, "/exams", Some("a.b.c"), None)
            .unwrap();
        assert_eq!(req.uri().to_string(), "http://127.0.0.1:9/exams");
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer a.b.c");
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }
}
