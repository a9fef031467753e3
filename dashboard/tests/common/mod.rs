#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use dashboard::api::{ApiError, Backend};
use dashboard::{Dashboard, SessionStore};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use shared::types::{
    AppConfig, Entity, LoginData, LoginPayload, SendOtpRequest, TokenClaims, UserType,
    VerifyOtpRequest,
};

pub const PASSWORD: &str = "hunter22";

pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// HS256 token expiring `ttl` seconds from now (negative = already expired).
pub fn mint_token(ttl: i64) -> String {
    let claims = TokenClaims {
        sub: Some("1".into()),
        exp: (now() as i64 + ttl) as u64,
        iat: Some(now()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

pub fn admin_profile(role: &str) -> Value {
    json!({
        "id": 1,
        "full_name": "Dilnoza Karimova",
        "email": "dilnoza@example.com",
        "phone_number": "+998901234567",
        "role": role,
    })
}

pub fn client_profile() -> Value {
    json!({
        "id": 7,
        "full_name": "Acme Learning",
        "email": "ops@acme.example",
        "balance": 120.5,
        "mock_price": 15.0,
        "location": "Tashkent",
    })
}

/// In-process backend. Collections hold raw JSON rows; every call is
/// recorded by name so tests can assert on what was (not) sent.
pub struct MockBackend {
    profile: Mutex<Value>,
    token: Mutex<String>,
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
    reset_error: Mutex<Option<(u16, String)>>,
    login_error: Mutex<Option<(u16, String)>>,
    next_id: Mutex<i64>,
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new(profile: Value) -> Self {
        let mut collections = HashMap::new();
        collections.insert(
            "exams".to_string(),
            vec![
                json!({"id": 1, "title": "IELTS Mock 1"}),
                json!({"id": 2, "title": "IELTS Mock 2"}),
                json!({"id": 3, "title": "CEFR B2"}),
            ],
        );
        collections.insert(
            "admins".to_string(),
            vec![
                json!({"id": 1, "full_name": "Dilnoza Karimova", "email": "dilnoza@example.com", "role": "superadmin"}),
                json!({"id": 2, "full_name": "Timur Aliev", "email": "timur@example.com", "role": "admin"}),
            ],
        );
        collections.insert(
            "clients".to_string(),
            vec![
                json!({"id": 7, "full_name": "Acme", "email": "a@acme.example", "balance": 100.0}),
                json!({"id": 8, "full_name": "Bright", "email": "b@bright.example", "balance": 50.5}),
            ],
        );
        collections.insert("writing-sections".to_string(), Vec::new());

        Self {
            profile: Mutex::new(profile),
            token: Mutex::new(mint_token(3600)),
            collections: Mutex::new(collections),
            failing: Mutex::new(HashSet::new()),
            reset_error: Mutex::new(None),
            login_error: Mutex::new(None),
            next_id: Mutex::new(100),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_token(&self, token: String) {
        *self.token.lock().unwrap() = token;
    }

    pub fn fail_collection(&self, collection: &str) {
        self.failing.lock().unwrap().insert(collection.to_string());
    }

    pub fn fail_reset(&self, status: u16, message: &str) {
        *self.reset_error.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn fail_login(&self, status: u16, message: &str) {
        *self.login_error.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn rows(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(Vec::len)
            .unwrap_or_default()
    }

    fn record(&self, name: impl Into<String>) {
        self.calls.lock().unwrap().push(name.into());
    }

    fn check_failing(&self, collection: &str) -> Result<(), ApiError> {
        if self.failing.lock().unwrap().contains(collection) {
            return Err(ApiError::status(500, format!("{} unavailable", collection)));
        }
        Ok(())
    }
}

impl Backend for MockBackend {
    async fn login(&self, _user_type: UserType, data: &LoginData) -> Result<LoginPayload, ApiError> {
        self.record("login");
        if let Some((status, message)) = self.login_error.lock().unwrap().clone() {
            return Err(ApiError::status(status, message));
        }
        if data.password != PASSWORD {
            return Err(ApiError::status(401, "Invalid email or password"));
        }
        Ok(LoginPayload {
            access_token: self.token.lock().unwrap().clone(),
            profile: self.profile.lock().unwrap().clone(),
        })
    }

    async fn send_otp(&self, _user_type: UserType, _request: &SendOtpRequest) -> Result<(), ApiError> {
        self.record("send_otp");
        match self.reset_error.lock().unwrap().clone() {
            Some((status, message)) => Err(ApiError::status(status, message)),
            None => Ok(()),
        }
    }

    async fn verify_otp_and_reset(
        &self,
        _user_type: UserType,
        _request: &VerifyOtpRequest,
    ) -> Result<(), ApiError> {
        self.record("verify_otp");
        match self.reset_error.lock().unwrap().clone() {
            Some((status, message)) => Err(ApiError::status(status, message)),
            None => Ok(()),
        }
    }

    async fn confirm_password(&self, _token: &str, password: &str) -> Result<(), ApiError> {
        self.record("confirm_password");
        if password == PASSWORD {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: 401,
                message: None,
            })
        }
    }

    async fn list<T: Entity>(&self, _token: &str) -> Result<Vec<T>, ApiError> {
        self.record(format!("list:{}", T::COLLECTION));
        self.check_failing(T::COLLECTION)?;
        let rows = self
            .collections
            .lock()
            .unwrap()
            .get(T::COLLECTION)
            .cloned()
            .unwrap_or_default();
        Ok(serde_json::from_value(Value::Array(rows))?)
    }

    async fn create<T: Entity>(&self, _token: &str, draft: &T::Draft) -> Result<T, ApiError> {
        self.record(format!("create:{}", T::COLLECTION));
        self.check_failing(T::COLLECTION)?;
        let mut row = serde_json::to_value(draft)?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        row["id"] = json!(id);
        self.collections
            .lock()
            .unwrap()
            .entry(T::COLLECTION.to_string())
            .or_default()
            .push(row.clone());
        Ok(serde_json::from_value(row)?)
    }

    async fn update<T: Entity>(&self, _token: &str, id: i64, draft: &T::Draft) -> Result<T, ApiError> {
        self.record(format!("update:{}", T::COLLECTION));
        self.check_failing(T::COLLECTION)?;
        let mut row = serde_json::to_value(draft)?;
        row["id"] = json!(id);
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(T::COLLECTION.to_string()).or_default();
        match rows.iter_mut().find(|r| r["id"] == json!(id)) {
            Some(existing) => *existing = row.clone(),
            None => return Err(ApiError::status(404, "Not found")),
        }
        Ok(serde_json::from_value(row)?)
    }

    async fn delete<T: Entity>(&self, _token: &str, id: i64) -> Result<(), ApiError> {
        self.record(format!("delete:{}", T::COLLECTION));
        self.check_failing(T::COLLECTION)?;
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(T::COLLECTION.to_string()).or_default();
        let before = rows.len();
        rows.retain(|r| r["id"] != json!(id));
        if rows.len() == before {
            return Err(ApiError::status(404, "Not found"));
        }
        Ok(())
    }
}

pub fn dashboard(profile: Value) -> Dashboard<MockBackend> {
    Dashboard::with_backend(
        AppConfig::with_base_url("http://backend.test"),
        SessionStore::in_memory(),
        MockBackend::new(profile),
    )
}

/// A dashboard already logged in as the given account.
pub async fn logged_in(user_type: UserType, profile: Value) -> Dashboard<MockBackend> {
    let app = dashboard(profile);
    app.login(user_type, &LoginData::new("dilnoza@example.com", PASSWORD))
        .await
        .unwrap();
    app
}
