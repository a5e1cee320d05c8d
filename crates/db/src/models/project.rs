//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{DbId, Timestamp};

/// Full project row from the `projects` table.
///
/// `layout` holds the content-block document as a JSON array; `[]` means the
/// project has never saved one. `files` is a list of attached documents
/// (`{url, name, content_type}` objects).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub project_date: Option<NaiveDate>,
    pub category: String,
    pub cover_image: Option<String>,
    pub hover_image: Option<String>,
    pub images: Vec<String>,
    pub files: serde_json::Value,
    pub layout: serde_json::Value,
    pub is_featured: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owner comes from the authenticated
/// caller, not the body.
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub project_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub hover_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub files: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
}

/// DTO for updating an existing project. All fields are optional; `None`
/// leaves the column unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub project_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub hover_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub files: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
}
