use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_featured_project(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let featured = state
        .project_handler
        .get_featured()
        .await?
        .ok_or_else(|| AppError::NotFound("No featured project".to_string()))?;
    Ok(HttpResponse::Ok().json(featured))
}

#[instrument(skip(state))]
pub async fn get_project_stats(
    params: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (owner, name) = params.into_inner();
    let stats = state
        .project_handler
        .get_stats_by_owner_and_name(&owner, &name)
        .await?;
    Ok(HttpResponse::Ok().json(stats))
}
