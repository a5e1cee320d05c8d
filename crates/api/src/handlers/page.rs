//! Handler for the public project page.
//!
//! Serves server-rendered HTML at `/projects/{slug}`, outside `/api/v1`.

use axum::extract::{Path, State};
use axum::response::Html;

use atelier_core::autolayout::generate_initial_layout;
use atelier_core::layout::Layout;
use atelier_core::render::render_project_page;
use atelier_core::validation::format_category;
use atelier_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /projects/{slug}
///
/// The visitor-facing page: the saved layout rendered in View mode, or a
/// synthesized document for projects that never saved one. Rendering never
/// writes anything back.
pub async fn project_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No project at '{slug}'")))?;

    let layout = Layout::from_json(project.layout.clone()).map_err(AppError::Core)?;
    let layout = if layout.is_empty() {
        generate_initial_layout(
            &project.description,
            project.cover_image.as_deref(),
            &project.images,
        )
    } else {
        layout
    };

    let category = format_category(&project.category);
    Ok(Html(render_project_page(&project.title, &category, &layout)))
}
