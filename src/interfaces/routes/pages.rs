use actix_web::web;

use crate::handlers::pages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pages")
            .service(
                web::resource("/{name}")
                    .route(web::get().to(pages::get_page_by_name))
            )
    );
}
