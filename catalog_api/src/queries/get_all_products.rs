use crate::context::RequestScope;
use crate::error::Result;
use crate::models::product::Product;
use mediator::{CancellationToken, Request, RequestHandler};

pub struct GetAllProductsQuery;
impl Request<Result<Vec<Product>>> for GetAllProductsQuery {}

pub struct GetAllProductsQueryHandler;

#[mediator::async_trait]
impl RequestHandler<GetAllProductsQuery, Result<Vec<Product>>, RequestScope>
    for GetAllProductsQueryHandler
{
    async fn handle(
        &self,
        _: GetAllProductsQuery,
        context: &mut RequestScope,
        _: CancellationToken,
    ) -> Result<Vec<Product>> {
        let products = context.products().to_list().await?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DbContext, MemoryDatabase};
    use crate::models::product::NewProduct;
    use std::sync::Arc;

    #[tokio::test]
    async fn get_all_products_test() {
        let mut context = DbContext::new(Arc::new(MemoryDatabase::new()));
        let scope: &mut RequestScope = &mut context;

        let empty = GetAllProductsQueryHandler
            .handle(GetAllProductsQuery, &mut *scope, CancellationToken::new())
            .await
            .unwrap();
        assert!(empty.is_empty());

        for name in ["Pen", "Ink", "Pad"] {
            scope.products().add(NewProduct {
                name: name.to_owned(),
                ..Default::default()
            });
        }
        scope.save_changes().await.unwrap();

        let products = GetAllProductsQueryHandler
            .handle(GetAllProductsQuery, &mut *scope, CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(products[1].name, "Ink");
    }
}
