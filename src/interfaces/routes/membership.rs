use actix_web::web;

use crate::handlers::membership;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/membership")
            .service(
                web::resource("")
                    .route(web::post().to(membership::submit_membership))
                    .route(web::get().to(membership::list_memberships))
            )
            .service(
                web::resource("/{membership_id}")
                    .route(web::put().to(membership::update_membership))
                    .route(web::delete().to(membership::delete_membership))
            )
    );
}
