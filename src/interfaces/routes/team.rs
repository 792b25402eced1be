use actix_web::web;

use crate::handlers::team;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/team")
            .service(
                web::resource("")
                    .route(web::get().to(team::list_team))
                    .route(web::post().to(team::create_team_member))
            )
            .service(
                web::resource("/{member_id}")
                    .route(web::get().to(team::get_team_member))
                    .route(web::put().to(team::update_team_member))
                    .route(web::delete().to(team::delete_team_member))
            )
    );
}
