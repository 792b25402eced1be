use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::AppState;

#[instrument(skip(state))]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.stats_handler.site_stats().await)
}
