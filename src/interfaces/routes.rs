use actix_web::web;

use crate::handlers::{home::home, stats::get_stats};

mod admin;
mod auth;
mod contact;
mod events;
mod gallery;
mod json_error;
mod membership;
mod team;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home));

    cfg.service(
        web::scope("/api")
            .configure(auth::config_routes)
            .configure(events::config_routes)
            .configure(team::config_routes)
            .configure(gallery::config_routes)
            .configure(membership::config_routes)
            .configure(contact::config_routes)
            .configure(admin::config_routes)
            .route("/stats", web::get().to(get_stats)),
    );

    cfg.configure(json_error::config_routes);
}
