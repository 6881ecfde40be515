use crate::context::{RequestScope, StoreError};
use crate::error::Result;
use crate::models::product::NewProduct;
use mediator::{CancellationToken, Request, RequestHandler};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field values of the product to create. Missing fields take their default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductCommand {
    pub name: String,
    pub barcode: String,
    pub description: String,
    pub is_active: bool,
    pub rate: f64,
    pub buying_price: f64,
}

impl Request<Result<i32>> for CreateProductCommand {}

pub struct CreateProductCommandHandler;

#[mediator::async_trait]
impl RequestHandler<CreateProductCommand, Result<i32>, RequestScope> for CreateProductCommandHandler {
    async fn handle(
        &self,
        command: CreateProductCommand,
        context: &mut RequestScope,
        _: CancellationToken,
    ) -> Result<i32> {
        let entry = context.products().add(NewProduct {
            name: command.name,
            barcode: command.barcode,
            description: command.description,
            is_active: command.is_active,
            rate: command.rate,
            buying_price: command.buying_price,
        });

        context.save_changes().await?;

        let id = context
            .products()
            .key_of(entry)
            .ok_or(StoreError::KeyNotAssigned(entry))?;

        log::info!("Created product {}", id);
        Ok(id)
    }
}
