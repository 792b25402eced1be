use actix_web::{HttpResponse, Responder};

pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Real Estate Club API is running",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/api/events", "/api/team", "/api/gallery", "/api/membership", "/api/contact", "/api/stats"]
    }))
}
