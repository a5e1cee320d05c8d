//! Handlers for the layout editor endpoints under
//! `/admin/projects/{id}/layout`.
//!
//! The layout column is the single source of truth: saves overwrite it
//! wholesale (last writer wins) and loads never write. A project that has
//! never saved a layout gets a synthesized starting document derived from its
//! own fields, flagged `generated` so the editor can tell it apart from real
//! saved state.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use atelier_core::audit::{actions, resources};
use atelier_core::autolayout::generate_initial_layout;
use atelier_core::blocks::{BlockKind, ContentBlock};
use atelier_core::editor::BlockDraft;
use atelier_core::error::CoreError;
use atelier_core::layout::Layout;
use atelier_core::render::{layout_to_html, RenderMode};
use atelier_core::types::DbId;
use atelier_core::validation::sanitize_rich_text;
use atelier_db::models::audit::NewAuditLog;
use atelier_db::models::project::Project;
use atelier_db::repositories::ProjectRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_owner_or_admin, find_live};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `GET .../layout`.
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    /// The block array, ready for the editor.
    pub blocks: serde_json::Value,
    /// True when the blocks were synthesized from project fields because no
    /// layout was ever saved.
    pub generated: bool,
}

/// Request body for `POST .../layout/blocks`.
#[derive(Debug, Deserialize)]
pub struct AppendBlockRequest {
    /// Block kind tag: `text`, `image`, `video`, `photo-grid`, `spacer`,
    /// `carousel`.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Source URL for image and video blocks.
    pub url: Option<String>,
    /// Starter content for text (HTML) and spacer (pixel height) blocks.
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects/{id}/layout
///
/// The editor's working document. Never writes; a synthesized document is
/// returned (flagged) when nothing was ever saved.
pub async fn get_layout(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<LayoutResponse>> {
    let project = find_live(&state, id).await?;
    ensure_owner_or_admin(&project, &user)?;

    let (layout, generated) = resolve_layout(&project)?;

    Ok(Json(LayoutResponse {
        blocks: layout.to_json().map_err(AppError::Core)?,
        generated,
    }))
}

/// PUT /api/v1/admin/projects/{id}/layout
///
/// Wholesale save. The body is the full block array; rich text is sanitized
/// before the overwrite. On any validation failure the stored row stays
/// untouched.
pub async fn save_layout(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let project = find_live(&state, id).await?;
    ensure_owner_or_admin(&project, &user)?;

    let layout = Layout::from_json(body).map_err(AppError::Core)?;
    let layout = sanitize_layout(layout)?;

    let value = layout.to_json().map_err(AppError::Core)?;
    let saved = ProjectRepo::update_layout(&state.pool, id, &value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(
        project_id = id,
        user_id = user.user_id,
        blocks = layout.len(),
        "Layout saved"
    );

    audit::record(
        &state.pool,
        NewAuditLog {
            user_id: Some(user.user_id),
            action: actions::LAYOUT_SAVE.to_string(),
            resource_type: resources::PROJECT.to_string(),
            resource_id: Some(id.to_string()),
            details: Some(json!({ "blocks": layout.len() })),
            ip_address: None,
            user_agent: None,
        },
    );

    Ok(Json(saved.layout))
}

/// POST /api/v1/admin/projects/{id}/layout/blocks
///
/// Append one block to the persisted document and save in the same request.
/// The block gets a fresh id and its kind's insertion defaults; a supplied
/// video URL is normalized into a playable one.
pub async fn append_block(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<AppendBlockRequest>,
) -> AppResult<(StatusCode, Json<ContentBlock>)> {
    let project = find_live(&state, id).await?;
    ensure_owner_or_admin(&project, &user)?;

    let block = build_block(&input)?;

    let mut layout = Layout::from_json(project.layout).map_err(AppError::Core)?;
    layout.push(block.clone());

    let value = layout.to_json().map_err(AppError::Core)?;
    ProjectRepo::update_layout(&state.pool, id, &value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(
        project_id = id,
        user_id = user.user_id,
        block_type = block.kind.type_name(),
        "Block appended to layout"
    );

    audit::record(
        &state.pool,
        NewAuditLog {
            user_id: Some(user.user_id),
            action: actions::LAYOUT_SAVE.to_string(),
            resource_type: resources::PROJECT.to_string(),
            resource_id: Some(id.to_string()),
            details: Some(json!({
                "appended": block.kind.type_name(),
                "blocks": layout.len(),
            })),
            ip_address: None,
            user_agent: None,
        },
    );

    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/v1/admin/projects/{id}/layout/preview
///
/// The working document rendered in Edit mode, placeholders visible.
pub async fn preview(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let project = find_live(&state, id).await?;
    ensure_owner_or_admin(&project, &user)?;

    let (layout, _) = resolve_layout(&project)?;
    Ok(Html(layout_to_html(&layout, RenderMode::Edit)))
}

/// GET /api/v1/admin/projects/{id}/images
///
/// Every image URL the project knows about, for the editor's image picker:
/// cover, hover, gallery, then anything already referenced by layout blocks.
/// Deduplicated, order preserved.
pub async fn image_pool(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<String>>> {
    let project = find_live(&state, id).await?;
    ensure_owner_or_admin(&project, &user)?;

    let layout = Layout::from_json(project.layout.clone()).map_err(AppError::Core)?;

    let mut pool: Vec<String> = Vec::new();
    let mut push_unique = |url: &str| {
        if !url.is_empty() && !pool.iter().any(|u| u == url) {
            pool.push(url.to_string());
        }
    };

    if let Some(cover) = &project.cover_image {
        push_unique(cover);
    }
    if let Some(hover) = &project.hover_image {
        push_unique(hover);
    }
    for url in &project.images {
        push_unique(url);
    }
    for url in layout.image_urls() {
        push_unique(url);
    }

    Ok(Json(pool))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the persisted layout, substituting the synthesized document when the
/// project never saved one. The bool is the `generated` flag.
fn resolve_layout(project: &Project) -> AppResult<(Layout, bool)> {
    let persisted = Layout::from_json(project.layout.clone()).map_err(AppError::Core)?;
    if !persisted.is_empty() {
        return Ok((persisted, false));
    }

    let generated = generate_initial_layout(
        &project.description,
        project.cover_image.as_deref(),
        &project.images,
    );
    let was_generated = !generated.is_empty();
    Ok((generated, was_generated))
}

/// Run every text block's content through the rich-text sanitizer.
fn sanitize_layout(layout: Layout) -> AppResult<Layout> {
    let blocks: Vec<ContentBlock> = layout
        .blocks()
        .iter()
        .cloned()
        .map(|mut block| {
            if let BlockKind::Text { content } = &mut block.kind {
                *content = sanitize_rich_text(content);
            }
            block
        })
        .collect();
    Layout::from_blocks(blocks).map_err(AppError::Core)
}

/// Build a new block from the append request: the kind's defaults plus the
/// optional url/content seed values.
fn build_block(input: &AppendBlockRequest) -> AppResult<ContentBlock> {
    let block = match input.block_type.as_str() {
        "text" => ContentBlock::new_text(),
        "image" => ContentBlock::new_image(),
        "video" => ContentBlock::new_video(),
        "photo-grid" => ContentBlock::new_photo_grid(),
        "spacer" => ContentBlock::new_spacer(),
        "carousel" => ContentBlock::new_carousel(),
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown block type '{other}'"
            ))))
        }
    };

    let mut draft = BlockDraft::from_block(&block);

    if let Some(url) = &input.url {
        match &block.kind {
            BlockKind::Video { .. } => draft.set_video_url(url),
            BlockKind::Image { .. } => draft.set_image(url, "", ""),
            _ => {}
        }
    }

    if let Some(content) = &input.content {
        match &block.kind {
            BlockKind::Text { .. } => draft.set_text_content(&sanitize_rich_text(content)),
            BlockKind::Spacer { .. } => {
                let height: u32 = content.trim().parse().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "Spacer height must be a number, got '{content}'"
                    )))
                })?;
                draft.set_spacer_height(height);
            }
            _ => {}
        }
    }

    Ok(draft.commit())
}
