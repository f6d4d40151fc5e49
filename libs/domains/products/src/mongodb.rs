//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::{ProductRepository, ProductStream};

// Server code for a duplicate-key write failure
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository over the "products" collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for optimal query performance
    pub async fn init_indexes(&self) -> ProductResult<()> {
        // _id is unique by construction; the price index serves range queries
        let index = IndexModel::builder()
            .keys(doc! { "price": 1 })
            .options(IndexOptions::builder().name("idx_price".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: &str) -> Document {
        doc! { "_id": id }
    }

    /// Inclusive-bounds filter on price
    fn price_range_filter(min: f64, max: f64) -> Document {
        doc! { "price": { "$gte": min, "$lte": max } }
    }

    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        use mongodb::error::{ErrorKind, WriteFailure};

        match *err.kind {
            ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
                write_error.code == DUPLICATE_KEY_CODE
            }
            _ => false,
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<ProductStream> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.map_err(ProductError::from).boxed())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_price_range(&self, min: f64, max: f64) -> ProductResult<ProductStream> {
        let cursor = self
            .collection
            .find(Self::price_range_filter(min, max))
            .await?;
        Ok(cursor.map_err(ProductError::from).boxed())
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, mut product: Product) -> ProductResult<Product> {
        // The store assigns identity when the client did not supply one
        if product.id.is_empty() {
            product.id = ObjectId::new().to_hex();
        }

        self.collection.insert_one(&product).await.map_err(|e| {
            if Self::is_duplicate_key(&e) {
                ProductError::DuplicateId(product.id.clone())
            } else {
                ProductError::from(e)
            }
        })?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: Product) -> ProductResult<Product> {
        self.collection
            .replace_one(Self::id_filter(&product.id), &product)
            .upsert(true)
            .await?;

        tracing::info!(product_id = %product.id, "Product updated successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<()> {
        // Idempotent: deleting a missing id is still a success
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        tracing::info!(product_id = %id, deleted_count = result.deleted_count, "Product delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_filter_is_inclusive_both_ends() {
        let filter = MongoProductRepository::price_range_filter(1200.0, 1500.0);
        let price = filter.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 1200.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 1500.0);
    }

    #[test]
    fn id_filter_targets_underscore_id() {
        let filter = MongoProductRepository::id_filter("101");
        assert_eq!(filter.get_str("_id").unwrap(), "101");
    }
}
