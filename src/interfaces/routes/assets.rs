use actix_web::web;

use crate::handlers::assets;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(assets::home)
        .service(assets::admin_shell)
        .service(assets::manifest)
        .service(assets::service_worker);
}
