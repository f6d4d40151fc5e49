use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Domain errors for product operations.
///
/// Note the narrow surface: a missing id on get/update is NOT an error here.
/// Those operations resolve to an empty result and the HTTP layer responds
/// 200 with an empty body. Legacy contract, kept on purpose.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::DuplicateId(id) => {
                AppError::Conflict(format!("Product with id '{}' already exists", id))
            }
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
