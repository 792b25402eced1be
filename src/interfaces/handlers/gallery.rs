use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    errors::AppError,
    handlers::multipart::read_media_form,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_gallery(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let items = state.gallery_handler.list().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[instrument(skip(state))]
pub async fn get_gallery_item(
    state: web::Data<AppState>,
    item_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&item_id)?;
    let item = state.gallery_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Requires either an uploaded `image` file or an `image` URL.
#[instrument(skip(_claims, state, payload))]
pub async fn create_gallery_item(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let form = read_media_form(payload, state.config.media.max_upload_bytes).await?;
    let item = state.gallery_handler.create(form).await?;
    Ok(HttpResponse::Created().json(item))
}

#[instrument(skip(_claims, state, payload))]
pub async fn update_gallery_item(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    item_id: web::Path<String>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&item_id)?;
    let form = read_media_form(payload, state.config.media.max_upload_bytes).await?;
    let item = state.gallery_handler.update(&id, form).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[instrument(skip(_claims, state))]
pub async fn delete_gallery_item(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    item_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&item_id)?;
    state.gallery_handler.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Gallery image deleted successfully" })))
}
