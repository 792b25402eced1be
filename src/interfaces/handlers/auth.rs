use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{token::RefreshTokenRequest, user::LoginUser},
    errors::{AppError, AuthError},
    use_cases::extractors::AuthClaims,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn login(
    state: web::Data<AppState>,
    data: web::Json<LoginUser>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.login(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, data))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    data: web::Json<RefreshTokenRequest>,
) -> Result<impl Responder, AuthError> {
    let response = state.auth_handler.refresh_token(&data.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(claims, state))]
pub async fn me(claims: AuthClaims, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let user = state.auth_handler.current_user(&claims.0).await?;
    Ok(HttpResponse::Ok().json(user))
}
