use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::membership::{NewMembership, UpdateMembership},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    utils::{get_client_ip::get_client_ip, valid_uuid::valid_uuid},
    AppState,
};

#[instrument(skip(req, state, data))]
pub async fn submit_membership(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<NewMembership>,
) -> Result<impl Responder, AppError> {
    let client = get_client_ip(&req, state.config.trust_forwarded_for);
    state
        .submission_limiter
        .check(&format!("membership:{}", client))
        .map_err(AppError::TooManyRequests)?;

    let response = state.membership_handler.submit(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_claims, state))]
pub async fn list_memberships(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let memberships = state.membership_handler.list().await?;
    Ok(HttpResponse::Ok().json(memberships))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_membership(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    membership_id: web::Path<String>,
    data: web::Json<UpdateMembership>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&membership_id)?;
    let membership = state.membership_handler.update(&id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(membership))
}

#[instrument(skip(_claims, state))]
pub async fn delete_membership(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    membership_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&membership_id)?;
    state.membership_handler.delete(&id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Membership deleted successfully" })))
}
