//! Handler for `POST /admin/uploads`: multipart file uploads.
//!
//! Any number of `file` parts plus an optional `folder` text field. Files are
//! validated, renamed to collision-free object names, and stored through the
//! configured [`StorageProvider`] concurrently. Each part succeeds or fails
//! on its own; a failed part never rolls back stored siblings.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use atelier_core::audit::{actions, resources};
use atelier_core::validation::{validate_folder, validate_upload, UploadKind};
use atelier_db::models::audit::NewAuditLog;
use atelier_storage::naming::object_name;
use atelier_storage::StorageProvider;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Destination folder used when the form does not name one.
const DEFAULT_FOLDER: &str = "uploads";

/// One file part pulled out of the multipart form.
struct IncomingFile {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

/// Per-file result in the upload response.
#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    /// The client's original filename.
    pub source: String,
    /// Public URL of the stored file, when storage succeeded.
    pub url: Option<String>,
    /// Human-readable failure reason, when it did not.
    pub error: Option<String>,
}

/// Response body for `POST /admin/uploads`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploaded: Vec<UploadOutcome>,
    /// True when at least one part failed while others stored.
    pub partial: bool,
}

/// POST /api/v1/admin/uploads
///
/// Store uploaded files and report a per-file outcome. Always 200; check
/// `partial` and the per-file `error` fields.
pub async fn upload(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut folder = DEFAULT_FOLDER.to_string();
    let mut files: Vec<IncomingFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder" => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "file" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                files.push(IncomingFile {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {} // ignore unknown fields
        }
    }

    validate_folder(&folder).map_err(AppError::Core)?;

    if files.is_empty() {
        return Err(AppError::BadRequest(
            "No files received in multipart upload".to_string(),
        ));
    }

    // Store all parts concurrently; each resolves to its own outcome.
    let tasks = files.into_iter().map(|file| {
        let storage = state.storage.clone();
        let folder = folder.clone();
        async move { store_one(storage, &folder, file).await }
    });
    let outcomes: Vec<UploadOutcome> = futures::future::join_all(tasks).await;

    let stored: Vec<&str> = outcomes
        .iter()
        .filter_map(|o| o.url.as_deref())
        .collect();
    let partial = stored.len() < outcomes.len();

    tracing::info!(
        user_id = user.user_id,
        folder = %folder,
        stored = stored.len(),
        failed = outcomes.len() - stored.len(),
        "Upload processed"
    );

    if !stored.is_empty() {
        audit::record(
            &state.pool,
            NewAuditLog {
                user_id: Some(user.user_id),
                action: actions::FILE_UPLOAD.to_string(),
                resource_type: resources::FILE.to_string(),
                resource_id: Some(folder.clone()),
                details: Some(json!({ "folder": folder, "urls": stored })),
                ip_address: None,
                user_agent: None,
            },
        );
    }

    Ok(Json(UploadResponse {
        uploaded: outcomes,
        partial,
    }))
}

/// Validate and store one file, capturing any failure as the outcome's error.
async fn store_one(
    storage: Arc<dyn StorageProvider>,
    folder: &str,
    file: IncomingFile,
) -> UploadOutcome {
    let source = file.filename.clone();
    match try_store(storage, folder, file).await {
        Ok(url) => UploadOutcome {
            source,
            url: Some(url),
            error: None,
        },
        Err(reason) => UploadOutcome {
            source,
            url: None,
            error: Some(reason),
        },
    }
}

async fn try_store(
    storage: Arc<dyn StorageProvider>,
    folder: &str,
    file: IncomingFile,
) -> Result<String, String> {
    let kind = validate_upload(&file.filename, file.data.len()).map_err(|e| e.to_string())?;

    // Raster images must actually parse as one; extension alone is not
    // trusted. SVG is XML and has no magic bytes to sniff.
    if kind == UploadKind::Image && !file.filename.to_ascii_lowercase().ends_with(".svg") {
        image::guess_format(&file.data)
            .map_err(|_| format!("'{}' is not a recognized image", file.filename))?;
    }

    let stored_name = object_name(&file.filename);
    storage
        .store(folder, &stored_name, file.data, &file.content_type)
        .await
        .map_err(|e| e.to_string())
}
