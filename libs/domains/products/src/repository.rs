use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ProductResult;
use crate::models::Product;

/// A cursor-backed stream of products.
///
/// Elements are fetched incrementally; dropping the stream releases the
/// cursor without fetching the remainder.
pub type ProductStream = BoxStream<'static, ProductResult<Product>>;

/// Repository trait for Product persistence
///
/// The six store operations the domain needs. Implementations can use
/// different storage backends (MongoDB, an in-memory substitute in tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Stream all products, in storage order
    async fn find_all(&self) -> ProductResult<ProductStream>;

    /// Get a product by id; `None` when no record matches
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Stream products whose price lies in `[min, max]`, bounds inclusive
    async fn find_by_price_range(&self, min: f64, max: f64) -> ProductResult<ProductStream>;

    /// Insert a new product; assigns an id when the incoming one is empty.
    /// Fails with `DuplicateId` when a record with the same id exists.
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Replace the record with the product's id, inserting if absent (upsert)
    async fn replace(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by id; succeeds whether or not the record existed
    async fn delete(&self, id: &str) -> ProductResult<()>;
}
