//! Product Service - DTO translation plus store invocation

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use tracing::instrument;

use crate::dto::{dto_to_entity, entity_to_dto, ProductDto};
use crate::error::ProductResult;
use crate::repository::ProductRepository;

/// A cursor-backed stream of product DTOs.
pub type ProductDtoStream = BoxStream<'static, ProductResult<ProductDto>>;

/// Product service translating between the wire shape and the persisted
/// entity, and issuing the corresponding store operation.
///
/// Owns no state beyond the repository handle. Update's lookup-then-replace
/// is not atomic: concurrent updates to the same id race and the last write
/// wins. That tradeoff is part of the contract, not a gap.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Stream all products as DTOs, in storage order.
    ///
    /// Lazy: entities are converted as the cursor yields them. Restartable
    /// only by calling again.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<ProductDtoStream> {
        let products = self.repository.find_all().await?;
        Ok(products.map_ok(entity_to_dto).boxed())
    }

    /// Get a single product by id; `None` when no record matches.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Option<ProductDto>> {
        let product = self.repository.find_by_id(id).await?;
        Ok(product.map(entity_to_dto))
    }

    /// Stream products whose price lies in `[min, max]`, bounds inclusive.
    /// Filtering happens in the store query layer.
    #[instrument(skip(self))]
    pub async fn get_products_in_range(
        &self,
        min: f64,
        max: f64,
    ) -> ProductResult<ProductDtoStream> {
        let products = self.repository.find_by_price_range(min, max).await?;
        Ok(products.map_ok(entity_to_dto).boxed())
    }

    /// Insert a new product.
    ///
    /// The repository assigns an id when the incoming one is empty; an id
    /// that already exists fails with `DuplicateId`.
    #[instrument(skip(self, dto), fields(product_name = %dto.name))]
    pub async fn save_product(&self, dto: ProductDto) -> ProductResult<ProductDto> {
        let product = dto_to_entity(dto);
        let created = self.repository.insert(product).await?;
        Ok(entity_to_dto(created))
    }

    /// Replace the product stored under `id` with the incoming values.
    ///
    /// The path-supplied id wins over any id in the body. A missing id is a
    /// no-op resolving to `None`; update never creates a record.
    #[instrument(skip(self, dto))]
    pub async fn update_product(&self, dto: ProductDto, id: &str) -> ProductResult<Option<ProductDto>> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut product = dto_to_entity(dto);
        product.id = id.to_string();

        let updated = self.repository.replace(product).await?;
        Ok(Some(entity_to_dto(updated)))
    }

    /// Delete a product by id; succeeds whether or not the record existed.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::models::Product;
    use crate::repository::MockProductRepository;
    use futures::stream;

    fn product(id: &str, name: &str, quantity: i32, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            price,
        }
    }

    fn dto(id: &str, name: &str, quantity: i32, price: f64) -> ProductDto {
        ProductDto {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn list_products_converts_each_entity_in_order() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(stream::iter(vec![
                Ok(product("101", "Charger", 5, 1200.00)),
                Ok(product("102", "TWS", 4, 1500.00)),
                Ok(product("103", "Earphone", 3, 2000.00)),
            ])
            .boxed())
        });

        let service = ProductService::new(repo);
        let dtos: Vec<ProductDto> = service
            .list_products()
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(
            dtos,
            vec![
                dto("101", "Charger", 5, 1200.00),
                dto("102", "TWS", 4, 1500.00),
                dto("103", "Earphone", 3, 2000.00),
            ]
        );
    }

    #[tokio::test]
    async fn get_product_returns_matching_dto() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id == "101")
            .returning(|_| Ok(Some(product("101", "Charger", 5, 1200.00))));

        let service = ProductService::new(repo);
        let found = service.get_product("101").await.unwrap();

        assert_eq!(found, Some(dto("101", "Charger", 5, 1200.00)));
    }

    #[tokio::test]
    async fn get_product_missing_id_is_none_not_error() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        assert_eq!(service.get_product("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn range_query_delegates_bounds_to_repository() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_price_range()
            .withf(|min, max| *min == 1200.0 && *max == 1500.0)
            .returning(|_, _| {
                Ok(stream::iter(vec![
                    Ok(product("101", "Charger", 5, 1200.00)),
                    Ok(product("102", "TWS", 4, 1500.00)),
                ])
                .boxed())
            });

        let service = ProductService::new(repo);
        let dtos: Vec<ProductDto> = service
            .get_products_in_range(1200.0, 1500.0)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(dtos.len(), 2);
    }

    #[tokio::test]
    async fn save_product_round_trips_the_dto() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|p| p.id == "101" && p.name == "Charger")
            .returning(Ok);

        let service = ProductService::new(repo);
        let created = service
            .save_product(dto("101", "Charger", 5, 1200.00))
            .await
            .unwrap();

        assert_eq!(created, dto("101", "Charger", 5, 1200.00));
    }

    #[tokio::test]
    async fn save_product_surfaces_duplicate_id() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .returning(|p| Err(ProductError::DuplicateId(p.id)));

        let service = ProductService::new(repo);
        let result = service.save_product(dto("101", "Charger", 5, 1200.00)).await;

        assert!(matches!(result, Err(ProductError::DuplicateId(id)) if id == "101"));
    }

    #[tokio::test]
    async fn update_forces_path_id_over_body_id() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id == "101")
            .returning(|_| Ok(Some(product("101", "Charger", 5, 1200.00))));
        repo.expect_replace()
            .withf(|p| p.id == "101" && p.name == "Charger-X")
            .returning(Ok);

        let service = ProductService::new(repo);
        let updated = service
            .update_product(dto("999", "Charger-X", 5, 1200.00), "101")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, "101");
        assert_eq!(updated.name, "Charger-X");
    }

    #[tokio::test]
    async fn update_missing_id_is_noop() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_replace().never();

        let service = ProductService::new(repo);
        let result = service
            .update_product(dto("999", "Charger-X", 5, 1200.00), "404")
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn delete_succeeds_for_missing_id() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .withf(|id| id == "missing")
            .returning(|_| Ok(()));

        let service = ProductService::new(repo);
        assert!(service.delete_product("missing").await.is_ok());
    }
}
