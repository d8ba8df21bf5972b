use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    errors::AppError,
    infrastructure::utils::mime,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.post_handler.list_with_details().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
pub async fn get_latest_post(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let post = state
        .post_handler
        .get_latest()
        .await?
        .ok_or_else(|| AppError::NotFound("No posts published yet".to_string()))?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(state))]
pub async fn get_post_by_name(
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.post_handler.get_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(state))]
pub async fn get_post_assets(
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let assets = state.post_handler.list_assets_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(assets))
}

/// Proxies a single asset file out of the content repository. Only
/// extensions with a known content type are served.
#[instrument(skip(state))]
pub async fn get_post_asset(
    params: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (name, path) = params.into_inner();
    let content_type = mime::from_path(&path)
        .ok_or_else(|| AppError::NotFound(format!("Unsupported asset type: {}", path)))?;

    let body = state.post_handler.get_asset(&name, &path).await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(body))
}
