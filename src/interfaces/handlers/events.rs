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
pub async fn list_events(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let events = state.event_handler.list().await?;
    Ok(HttpResponse::Ok().json(events))
}

#[instrument(skip(state))]
pub async fn get_event(
    state: web::Data<AppState>,
    event_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&event_id)?;
    let event = state.event_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(event))
}

#[instrument(skip(_claims, state, payload))]
pub async fn create_event(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let form = read_media_form(payload, state.config.media.max_upload_bytes).await?;
    let event = state.event_handler.create(form).await?;
    Ok(HttpResponse::Created().json(event))
}

#[instrument(skip(_claims, state, payload))]
pub async fn update_event(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    event_id: web::Path<String>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&event_id)?;
    let form = read_media_form(payload, state.config.media.max_upload_bytes).await?;
    let event = state.event_handler.update(&id, form).await?;
    Ok(HttpResponse::Ok().json(event))
}

#[instrument(skip(_claims, state))]
pub async fn delete_event(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    event_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&event_id)?;
    state.event_handler.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Event deleted successfully" })))
}
