use serde::{Deserialize, Serialize};

/// Subjects the contact form accepts.
pub const CONTACT_SUBJECTS: &[&str] = &[
    "general",
    "order",
    "wholesale",
    "franchise",
    "partnership",
    "feedback",
    "support",
];

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}
