use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product entity - represents a product stored in MongoDB
///
/// The id is a free-form string: either supplied by the client or assigned
/// by the repository at insert time. It never changes after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Product name
    pub name: String,
    /// Quantity on hand (non-negative expected, not enforced)
    pub quantity: i32,
    /// Unit price (non-negative expected, not enforced)
    pub price: f64,
}
