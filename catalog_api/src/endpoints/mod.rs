use crate::config::Environment;
use actix_web::web;

pub mod docs;
pub mod products;

/// Registers the routes of the service.
pub fn configure(cfg: &mut web::ServiceConfig, environment: Environment) {
    cfg.service(
        web::scope("/api/product")
            .service(products::create)
            .service(products::get_all)
            .service(products::get)
            .service(products::update)
            .service(products::delete),
    );

    if environment == Environment::Development {
        cfg.service(docs::swagger_ui());
    }
}
