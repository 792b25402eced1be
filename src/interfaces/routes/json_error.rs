use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

/// Malformed or mistyped JSON bodies become a 400 in the usual error shape.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(64 * 1024).error_handler(|err, _req| {
        let message = match &err {
            JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
            other => format!("Invalid JSON body: {}", other),
        };
        AppError::InvalidInput(message).into()
    }));
}
