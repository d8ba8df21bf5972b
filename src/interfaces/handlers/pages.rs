use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_page_by_name(
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state.page_handler.get_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(page))
}
