use crate::context::RequestScope;
use crate::error::Result;
use mediator::{CancellationToken, Request, RequestHandler};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// New field values for the product `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProductCommand {
    #[serde(alias = "Id")]
    pub id: i32,
    pub name: String,
    pub barcode: String,
    pub description: String,
    pub rate: f64,
    pub buying_price: f64,
}

/// Resolves to the id of the updated product, or `None` when no product has that id.
impl Request<Result<Option<i32>>> for UpdateProductCommand {}

pub struct UpdateProductCommandHandler;

#[mediator::async_trait]
impl RequestHandler<UpdateProductCommand, Result<Option<i32>>, RequestScope>
    for UpdateProductCommandHandler
{
    async fn handle(
        &self,
        command: UpdateProductCommand,
        context: &mut RequestScope,
        _: CancellationToken,
    ) -> Result<Option<i32>> {
        let mut product = match context.products().find(command.id).await? {
            Some(product) => product,
            None => {
                log::debug!("No product {} to update", command.id);
                return Ok(None);
            }
        };

        product.name = command.name;
        product.barcode = command.barcode;
        product.description = command.description;
        product.rate = command.rate;
        product.buying_price = command.buying_price;

        context.products().update(product);
        context.save_changes().await?;

        log::info!("Updated product {}", command.id);
        Ok(Some(command.id))
    }
}
