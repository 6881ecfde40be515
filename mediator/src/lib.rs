//! # mediator
//! An implementation of the Mediator pattern in Rust where every request is
//! routed, by its type, to exactly one handler.
//!
//! Handlers hold no per-request state. The caller owns a scope (a database
//! session, a unit of work, ...) and lends it to the handler for one call,
//! together with the [CancellationToken] of the request.
//!
//! ## Mediator Pattern
//! https://en.wikipedia.org/wiki/Mediator_pattern
//!
//! ## Example
//! ```rust
//! use mediator::{CancellationToken, DefaultMediator, Mediator, Request, RequestHandler};
//!
//! #[derive(Debug, Clone, Eq, PartialEq)]
//! struct Product(String);
//!
//! struct AddProductRequest(String);
//! impl Request<Product> for AddProductRequest {}
//!
//! struct AddProductRequestHandler;
//!
//! #[mediator::async_trait]
//! impl RequestHandler<AddProductRequest, Product, Vec<Product>> for AddProductRequestHandler {
//!     async fn handle(
//!         &self,
//!         req: AddProductRequest,
//!         products: &mut Vec<Product>,
//!         _: CancellationToken,
//!     ) -> Product {
//!         let product = Product(req.0);
//!         products.push(product.clone());
//!         product
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mediator = DefaultMediator::<Vec<Product>>::builder()
//!     .add_handler(AddProductRequestHandler)
//!     .build();
//!
//! let mut products = Vec::new();
//! let product = mediator
//!     .send(
//!         AddProductRequest("Microwave".to_owned()),
//!         &mut products,
//!         CancellationToken::new(),
//!     )
//!     .await;
//!
//! assert_eq!(Ok(Product("Microwave".to_owned())), product);
//! assert_eq!(products.len(), 1);
//! # }
//! ```

/// A convenient result type.
pub type Result<T> = std::result::Result<T, error::Error>;

pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;

/// Module for the mediator request-response.
mod request;
pub use request::*;

/// Module for the errors.
mod error;
pub use error::*;

/// Module for the mediator.
mod mediator;
pub use crate::mediator::*;

/// Provides default implementations.
#[cfg(feature = "impls")]
mod default_impls;

#[cfg(feature = "impls")]
pub use default_impls::mediator_impl::*;
