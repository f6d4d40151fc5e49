//! Wire-facing transfer shape for products.
//!
//! The DTO carries the same field set as the entity; it exists so the wire
//! format stays decoupled from the storage shape (the entity serializes its
//! id as `_id` for MongoDB, the DTO as plain `id`). The two conversion
//! functions are pure, total, and inverse to each other under the current
//! field set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

/// Product DTO - the JSON shape exchanged with clients
///
/// `{ "id": string, "name": string, "quantity": integer, "price": number }`
///
/// `id` may be omitted on create; the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Convert a persisted entity into its transfer shape.
pub fn entity_to_dto(product: Product) -> ProductDto {
    ProductDto {
        id: product.id,
        name: product.name,
        quantity: product.quantity,
        price: product.price,
    }
}

/// Convert a transfer shape into a persistable entity.
pub fn dto_to_entity(dto: ProductDto) -> Product {
    Product {
        id: dto.id,
        name: dto.name,
        quantity: dto.quantity,
        price: dto.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "101".to_string(),
            name: "Charger".to_string(),
            quantity: 5,
            price: 1200.00,
        }
    }

    #[test]
    fn entity_round_trips_through_dto() {
        let product = sample_product();
        let round_tripped = dto_to_entity(entity_to_dto(product.clone()));
        assert_eq!(round_tripped, product);
    }

    #[test]
    fn dto_round_trips_through_entity() {
        let dto = ProductDto {
            id: "102".to_string(),
            name: "TWS".to_string(),
            quantity: 4,
            price: 1500.00,
        };
        let round_tripped = entity_to_dto(dto_to_entity(dto.clone()));
        assert_eq!(round_tripped, dto);
    }

    #[test]
    fn conversion_is_field_for_field() {
        let dto = entity_to_dto(sample_product());
        assert_eq!(dto.id, "101");
        assert_eq!(dto.name, "Charger");
        assert_eq!(dto.quantity, 5);
        assert_eq!(dto.price, 1200.00);
    }

    #[test]
    fn dto_id_defaults_to_empty_when_omitted() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"name":"Charger","quantity":5,"price":1200.0}"#).unwrap();
        assert!(dto.id.is_empty());
    }

    #[test]
    fn entity_serializes_id_as_underscore_id() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["_id"], "101");
        assert!(json.get("id").is_none());
    }
}
