use actix_web::web;

use crate::handlers::gallery;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gallery")
            .service(
                web::resource("")
                    .route(web::get().to(gallery::list_gallery))
                    .route(web::post().to(gallery::create_gallery_item))
            )
            .service(
                web::resource("/{item_id}")
                    .route(web::get().to(gallery::get_gallery_item))
                    .route(web::put().to(gallery::update_gallery_item))
                    .route(web::delete().to(gallery::delete_gallery_item))
            )
    );
}
