use crate::commands::{CreateProductCommand, DeleteProductByIdCommand, UpdateProductCommand};
use crate::context::{DbContext, RequestScope, SharedDatabase};
use crate::error::{CatalogError, Result};
use crate::models::product::Product;
use crate::queries::{GetAllProductsQuery, GetProductByIdQuery};
use crate::CatalogMediator;
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};
use mediator::{CancellationToken, Mediator, Request};

// Sends the request with a fresh store context. The token is cancelled once the
// request is answered or dropped by the client.
async fn dispatch<Req, Res>(
    mediator: &CatalogMediator,
    database: &SharedDatabase,
    req: Req,
) -> Result<Res>
where
    Req: Request<Result<Res>> + Send + 'static,
    Res: Send + 'static,
{
    let mut context = DbContext::new(database.clone());
    let scope: &mut RequestScope = &mut context;
    let token = CancellationToken::new();
    let _guard = token.clone().drop_guard();

    mediator.send(req, scope, token).await?
}

/// The id in the path must be the id of the product in the body.
pub fn ensure_matching_id(path_id: i32, body_id: i32) -> Result<()> {
    if path_id != body_id {
        return Err(CatalogError::IdMismatch { path_id, body_id });
    }

    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/product",
    request_body = CreateProductCommand,
    responses(
        (status = 200, description = "Id of the created product", body = i32)
    )
)]
#[post("")]
pub async fn create(
    mediator: Data<CatalogMediator>,
    database: Data<SharedDatabase>,
    body: Json<CreateProductCommand>,
) -> Result<HttpResponse> {
    let id = dispatch(&mediator, &database, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(id))
}

#[utoipa::path(
    get,
    path = "/api/product",
    responses(
        (status = 200, description = "Every product", body = [Product])
    )
)]
#[get("")]
pub async fn get_all(
    mediator: Data<CatalogMediator>,
    database: Data<SharedDatabase>,
) -> Result<HttpResponse> {
    let products: Vec<Product> = dispatch(&mediator, &database, GetAllProductsQuery).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No product has this id")
    )
)]
#[get("/{id}")]
pub async fn get(
    path: Path<i32>,
    mediator: Data<CatalogMediator>,
    database: Data<SharedDatabase>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let product = dispatch(&mediator, &database, GetProductByIdQuery { id }).await?;

    match product {
        Some(product) => Ok(HttpResponse::Ok().json(product)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[utoipa::path(
    put,
    path = "/api/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductCommand,
    responses(
        (status = 200, description = "Id of the updated product", body = i32),
        (status = 400, description = "The path id and the body id differ"),
        (status = 404, description = "No product has this id")
    )
)]
#[put("/{id}")]
pub async fn update(
    path: Path<i32>,
    mediator: Data<CatalogMediator>,
    database: Data<SharedDatabase>,
    body: Json<UpdateProductCommand>,
) -> Result<HttpResponse> {
    let command = body.into_inner();
    ensure_matching_id(path.into_inner(), command.id)?;

    match dispatch(&mediator, &database, command).await? {
        Some(id) => Ok(HttpResponse::Ok().json(id)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 501, description = "Deleting products is not supported")
    )
)]
#[delete("/{id}")]
pub async fn delete(
    path: Path<i32>,
    mediator: Data<CatalogMediator>,
    database: Data<SharedDatabase>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let id: i32 = dispatch(&mediator, &database, DeleteProductByIdCommand { id }).await?;
    Ok(HttpResponse::Ok().json(id))
}
