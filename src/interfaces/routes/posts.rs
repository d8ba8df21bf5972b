use actix_web::web;

use crate::handlers::posts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::get().to(posts::get_posts))
            )
            .service(
                web::resource("/latest")
                    .route(web::get().to(posts::get_latest_post))
            )
            .service(
                web::resource("/{name}")
                    .route(web::get().to(posts::get_post_by_name))
            )
            .service(
                web::resource("/{name}/assets")
                    .route(web::get().to(posts::get_post_assets))
            )
            .service(
                web::resource("/{name}/assets/{path:.*}")
                    .route(web::get().to(posts::get_post_asset))
            )
    );
}
