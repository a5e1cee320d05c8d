//! Handlers for the `/projects` resource: the public gallery endpoints and
//! the admin CRUD surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use atelier_core::audit::{actions, resources};
use atelier_core::error::CoreError;
use atelier_core::roles::ROLE_ADMIN;
use atelier_core::types::DbId;
use atelier_core::validation::{
    generate_slug, validate_category, validate_description, validate_slug, validate_title,
};
use atelier_db::models::audit::NewAuditLog;
use atelier_db::models::project::{CreateProject, Project, UpdateProject};
use atelier_db::repositories::ProjectRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub featured: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// List live projects, newest first. `?featured=true` narrows to the
/// featured set.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool, params.featured).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No project at '{slug}'")))?;
    Ok(Json(project))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/projects
///
/// Create a project owned by the caller. The slug is generated from the
/// title when not supplied.
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_input_fields(&input.title, input.description.as_deref(), input.category.as_deref())?;

    let slug = match &input.slug {
        Some(s) => s.clone(),
        None => generate_slug(&input.title),
    };
    validate_slug(&slug).map_err(AppError::Core)?;

    let project = ProjectRepo::create(&state.pool, user.user_id, &slug, &input).await?;

    tracing::info!(
        project_id = project.id,
        slug = %project.slug,
        user_id = user.user_id,
        "Project created"
    );

    audit::record(
        &state.pool,
        NewAuditLog {
            user_id: Some(user.user_id),
            action: actions::PROJECT_CREATE.to_string(),
            resource_type: resources::PROJECT.to_string(),
            resource_id: Some(project.id.to_string()),
            details: Some(json!({ "title": project.title, "slug": project.slug })),
            ip_address: None,
            user_agent: None,
        },
    );

    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Partial update; only provided fields change. Owner or admin.
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let existing = find_live(&state, id).await?;
    ensure_owner_or_admin(&existing, &user)?;

    if let Some(title) = &input.title {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(description) = &input.description {
        validate_description(description).map_err(AppError::Core)?;
    }
    if let Some(category) = &input.category {
        validate_category(category).map_err(AppError::Core)?;
    }
    if let Some(slug) = &input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(project_id = id, user_id = user.user_id, "Project updated");

    audit::record(
        &state.pool,
        NewAuditLog {
            user_id: Some(user.user_id),
            action: actions::PROJECT_UPDATE.to_string(),
            resource_type: resources::PROJECT.to_string(),
            resource_id: Some(id.to_string()),
            details: Some(json!({ "slug": project.slug })),
            ip_address: None,
            user_agent: None,
        },
    );

    Ok(Json(project))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Soft delete. Owner or admin. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_live(&state, id).await?;
    ensure_owner_or_admin(&existing, &user)?;

    let deleted = ProjectRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(project_id = id, user_id = user.user_id, "Project deleted");

    audit::record(
        &state.pool,
        NewAuditLog {
            user_id: Some(user.user_id),
            action: actions::PROJECT_DELETE.to_string(),
            resource_type: resources::PROJECT.to_string(),
            resource_id: Some(id.to_string()),
            details: Some(json!({ "slug": existing.slug })),
            ip_address: None,
            user_agent: None,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a live project or 404.
pub(crate) async fn find_live(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Admins may touch any project; editors only their own.
pub(crate) fn ensure_owner_or_admin(project: &Project, user: &AuthUser) -> AppResult<()> {
    if user.role != ROLE_ADMIN && project.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this project".into(),
        )));
    }
    Ok(())
}

fn validate_input_fields(
    title: &str,
    description: Option<&str>,
    category: Option<&str>,
) -> AppResult<()> {
    validate_title(title).map_err(AppError::Core)?;
    if let Some(description) = description {
        validate_description(description).map_err(AppError::Core)?;
    }
    if let Some(category) = category {
        validate_category(category).map_err(AppError::Core)?;
    }
    Ok(())
}
