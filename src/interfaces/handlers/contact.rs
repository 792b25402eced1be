use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact::{NewContactMessage, UpdateContactMessage},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::{get_client_ip::get_client_ip, valid_uuid::valid_uuid},
    AppState,
};

#[instrument(skip(req, state, data))]
pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<NewContactMessage>,
) -> Result<impl Responder, AppError> {
    let client = get_client_ip(&req, state.config.trust_forwarded_for);
    state
        .submission_limiter
        .check(&format!("contact:{}", client))
        .map_err(AppError::TooManyRequests)?;

    let response = state.contact_handler.submit(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_claims, state))]
pub async fn list_contacts(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list().await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_contact(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    message_id: web::Path<String>,
    data: web::Json<UpdateContactMessage>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&message_id)?;
    let message = state.contact_handler.update(&id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(_claims, state))]
pub async fn delete_contact(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    message_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&message_id)?;
    state.contact_handler.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Message deleted successfully" })))
}
