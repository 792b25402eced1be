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
pub async fn list_team(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let members = state.team_handler.list().await?;
    Ok(HttpResponse::Ok().json(members))
}

#[instrument(skip(state))]
pub async fn get_team_member(
    state: web::Data<AppState>,
    member_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&member_id)?;
    let member = state.team_handler.get(&id).await?;
    Ok(HttpResponse::Ok().json(member))
}

#[instrument(skip(_claims, state, payload))]
pub async fn create_team_member(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let form = read_media_form(payload, state.config.media.max_upload_bytes).await?;
    let member = state.team_handler.create(form).await?;
    Ok(HttpResponse::Created().json(member))
}

#[instrument(skip(_claims, state, payload))]
pub async fn update_team_member(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    member_id: web::Path<String>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&member_id)?;
    let form = read_media_form(payload, state.config.media.max_upload_bytes).await?;
    let member = state.team_handler.update(&id, form).await?;
    Ok(HttpResponse::Ok().json(member))
}

#[instrument(skip(_claims, state))]
pub async fn delete_team_member(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    member_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&member_id)?;
    state.team_handler.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Team member deleted successfully" })))
}
