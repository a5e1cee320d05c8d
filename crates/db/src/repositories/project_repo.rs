//! Repository for the `projects` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Shared column list; every query returns a fully hydrated `Project`.
const COLUMNS: &str = "id, user_id, title, slug, description, project_date, category, \
                       cover_image, hover_image, images, files, layout, is_featured, \
                       deleted_at, created_at, updated_at";

/// Provides CRUD and layout operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `user_id`, returning the created row.
    /// The layout column starts as an empty document.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        slug: &str,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (user_id, title, slug, description, project_date, category,
                 cover_image, hover_image, images, files, is_featured)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, COALESCE($6, ''),
                     $7, $8, COALESCE($9, ARRAY[]::TEXT[]),
                     COALESCE($10, '[]'::jsonb), COALESCE($11, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(input.project_date)
            .bind(&input.category)
            .bind(&input.cover_image)
            .bind(&input.hover_image)
            .bind(&input.images)
            .bind(&input.files)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its public slug. Excludes soft-deleted rows.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE slug = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List projects, newest first. `featured` narrows to the featured set
    /// when `Some(true)`. Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        featured: Option<bool>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deleted_at IS NULL
               AND ($1::BOOLEAN IS NULL OR is_featured = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(featured)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                project_date = COALESCE($5, project_date),
                category = COALESCE($6, category),
                cover_image = COALESCE($7, cover_image),
                hover_image = COALESCE($8, hover_image),
                images = COALESCE($9, images),
                files = COALESCE($10, files),
                is_featured = COALESCE($11, is_featured)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.project_date)
            .bind(&input.category)
            .bind(&input.cover_image)
            .bind(&input.hover_image)
            .bind(&input.images)
            .bind(&input.files)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the layout document wholesale. Last writer wins; the
    /// previous value is not consulted.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update_layout(
        pool: &PgPool,
        id: DbId,
        layout: &serde_json::Value,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET layout = $2
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(layout)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project by ID. Returns `true` if a row was marked
    /// deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
