use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod pages;
mod posts;
mod projects;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(posts::config_routes)
            .configure(pages::config_routes)
            .configure(projects::config_routes)
    );
}
