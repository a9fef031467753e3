use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::session::{AdminProfile, AdminRole, ClientProfile};

/// A backend collection the dashboard can list, create, edit and delete.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Path segment of the collection, e.g. `exams` in `/exams/{id}`.
    const COLLECTION: &'static str;

    /// Body sent on create and update.
    type Draft: Serialize;

    fn id(&self) -> i64;

    /// Fields the list page's search box matches against.
    fn search_text(&self) -> Vec<&str>;

    /// Case-insensitive substring match over [`Entity::search_text`].
    /// An empty needle matches everything.
    fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_text()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

// ---------------------------------------------------------------------------
// Exams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Entity for Exam {
    const COLLECTION: &'static str = "exams";
    type Draft = ExamDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

// ---------------------------------------------------------------------------
// Writing sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingSection {
    pub id: i64,
    pub exam_id: i64,
    pub title: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WritingSectionDraft {
    pub exam_id: i64,
    pub title: String,
    #[serde(default)]
    pub prompt: String,
}

impl Entity for WritingSection {
    const COLLECTION: &'static str = "writing-sections";
    type Draft = WritingSectionDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.prompt.as_str()]
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub type Admin = AdminProfile;
pub type Client = ClientProfile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    /// Only sent on create; the backend ignores an empty password on update.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub mock_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Entity for AdminProfile {
    const COLLECTION: &'static str = "admins";
    type Draft = AdminDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.full_name.as_str(),
            self.email.as_str(),
            self.phone_number.as_str(),
        ]
    }
}

impl Entity for ClientProfile {
    const COLLECTION: &'static str = "clients";
    type Draft = ClientDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![
            self.full_name.as_str(),
            self.email.as_str(),
            self.phone_number.as_str(),
        ];
        if let Some(location) = &self.location {
            fields.push(location.as_str());
        }
        fields
    }
}
