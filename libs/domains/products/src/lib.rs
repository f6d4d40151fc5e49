//! Products Domain
//!
//! CRUD domain for products stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← DTO ↔ entity translation, store invocation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTO
//! └─────────────┘
//! ```
//!
//! Multi-record results (list, price range) stay cursor-backed streams end
//! to end: the repository hands out a stream over the MongoDB cursor, the
//! service converts entities to DTOs element-at-a-time, and the handlers
//! write them out as an incremental JSON array. Nothing along that path
//! collects the result set.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use dto::{dto_to_entity, entity_to_dto, ProductDto};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::Product;
pub use mongodb::MongoProductRepository;
pub use repository::{ProductRepository, ProductStream};
pub use service::{ProductDtoStream, ProductService};
