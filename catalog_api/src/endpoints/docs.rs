use crate::commands::{CreateProductCommand, UpdateProductCommand};
use crate::endpoints::products;
use crate::models::product::Product;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "catalog_api", version = "v1"),
    paths(
        products::create,
        products::get_all,
        products::get,
        products::update,
        products::delete
    ),
    components(schemas(Product, CreateProductCommand, UpdateProductCommand))
)]
pub struct ApiDoc;

/// Swagger UI under `/swagger/`, backed by the document at `/swagger/v1/swagger.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger/{_:.*}").url("/swagger/v1/swagger.json", ApiDoc::openapi())
}
