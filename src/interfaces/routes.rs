use actix_web::web;

use crate::handlers::json_error::not_found;

mod assets;
mod auth;
mod json_error;
mod products;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(products::config_routes)
            .configure(auth::config_routes)
            .service(crate::handlers::system::health_check)
    );

    cfg.configure(assets::config_routes);
    cfg.configure(json_error::config_routes);

    cfg.default_service(web::route().to(not_found));
}
