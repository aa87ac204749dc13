use actix_web::web;

use crate::handlers::products;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(products::list_products)
        .service(products::get_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product);
}
