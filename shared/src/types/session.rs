use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Key holding the raw access token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the profile object serialized as JSON.
pub const PROFILE_KEY: &str = "user";
/// Key holding the user-type tag (`admin` | `client`).
pub const USER_TYPE_KEY: &str = "userType";

pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, PROFILE_KEY, USER_TYPE_KEY];

// ---------------------------------------------------------------------------
// Identity kinds and roles
// ---------------------------------------------------------------------------

/// Which kind of account a session belongs to. Selects the profile shape and
/// the backend endpoint family (`/admin/...` vs `/client/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Client,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }

    /// Parse the stored tag. Anything else is treated as "no user type".
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim() {
            "admin" => Some(Self::Admin),
            "client" => Some(Self::Client),
            _ => None,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
    SuperAdmin,
}

impl AdminRole {
    /// Resolve the `role` field of an admin profile. Only the exact string
    /// `superadmin` elevates; missing or unknown roles fall back to `admin`.
    pub fn from_claim(role: Option<&str>) -> Self {
        match role.map(str::trim) {
            Some("superadmin") => Self::SuperAdmin,
            _ => Self::Admin,
        }
    }
}

impl<'de> Deserialize<'de> for AdminRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_claim(raw.as_deref()))
    }
}

/// The effective role used for every gating decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    SuperAdmin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
            Self::Client => "client",
        }
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is signed in. A client never carries a role; an admin always does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    Admin { role: AdminRole },
    Client,
}

impl Principal {
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Admin { .. } => UserType::Admin,
            Self::Client => UserType::Client,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Admin {
                role: AdminRole::Admin,
            } => Role::Admin,
            Self::Admin {
                role: AdminRole::SuperAdmin,
            } => Role::SuperAdmin,
            Self::Client => Role::Client,
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: AdminRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub mock_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Exactly one profile shape per session, chosen by [`UserType`].
///
/// Serialized untagged so the stored JSON is the plain profile object the
/// backend returned; the shape is recovered with [`Profile::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Admin(AdminProfile),
    Client(ClientProfile),
}

impl Profile {
    /// Decode a profile of the given kind. A `role` field on a client profile
    /// is ignored; it is never consulted for clients.
    pub fn from_json(user_type: UserType, json: &str) -> serde_json::Result<Self> {
        match user_type {
            UserType::Admin => serde_json::from_str(json).map(Self::Admin),
            UserType::Client => serde_json::from_str(json).map(Self::Client),
        }
    }

    pub fn from_value(user_type: UserType, value: serde_json::Value) -> serde_json::Result<Self> {
        match user_type {
            UserType::Admin => serde_json::from_value(value).map(Self::Admin),
            UserType::Client => serde_json::from_value(value).map(Self::Client),
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            Self::Admin(_) => UserType::Admin,
            Self::Client(_) => UserType::Client,
        }
    }

    pub fn principal(&self) -> Principal {
        match self {
            Self::Admin(admin) => Principal::Admin { role: admin.role },
            Self::Client(_) => Principal::Client,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.full_name,
            Self::Client(client) => &client.full_name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.email,
            Self::Client(client) => &client.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A signed-in session as persisted in the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub profile: Profile,
}

impl Session {
    pub fn new(token: String, profile: Profile) -> Self {
        Self { token, profile }
    }

    pub fn user_type(&self) -> UserType {
        self.profile.user_type()
    }

    pub fn principal(&self) -> Principal {
        self.profile.principal()
    }

    pub fn profile_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.profile)
    }
}

// The token is deliberately left out.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user_type={}, email={}, role={}",
            self.user_type(),
            self.profile.email(),
            self.principal().role()
        )
    }
}
