use crate::context::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced by the catalog handlers and endpoints.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    Dispatch(#[from] mediator::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("path id {path_id} does not match body id {body_id}")]
    IdMismatch { path_id: i32, body_id: i32 },
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Dispatch(_) | CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            CatalogError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        match self {
            CatalogError::IdMismatch { .. } => HttpResponse::build(status).finish(),
            _ => HttpResponse::build(status).body(self.to_string()),
        }
    }
}
