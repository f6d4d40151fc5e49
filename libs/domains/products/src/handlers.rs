//! HTTP endpoints for the products domain.
//!
//! Pure delegation: handlers extract parameters, call the service, and
//! serialize the result. Multi-record responses stream element-at-a-time
//! via [`JsonArrayStream`]; nothing here collects a cursor into a Vec.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_helpers::{ErrorResponse, JsonArrayStream};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::dto::ProductDto;
use crate::error::ProductResult;
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        get_products_in_range,
        save_product,
        update_product,
        delete_product,
    ),
    components(schemas(ProductDto, ErrorResponse)),
    tags(
        (name = "Products", description = "Product management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Price range query parameters, bounds inclusive
#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeParams {
    pub min: f64,
    pub max: f64,
}

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/range", get(get_products_in_range))
        .route("/save", post(save_product))
        .route("/update/{id}", put(update_product))
        .route("/delete/{id}", delete(delete_product))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products, streamed as a JSON array", body = Vec<ProductDto>),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<impl IntoResponse> {
    let products = service.list_products().await?;
    Ok(JsonArrayStream(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "The product, or an empty body when the id is unknown", body = ProductDto),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Response> {
    let product = service.get_product(&id).await?;

    // A missing id resolves to 200 with an empty body, not 404. Legacy
    // contract, preserved deliberately.
    Ok(match product {
        Some(dto) => Json(dto).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// List products within a price range
#[utoipa::path(
    get,
    path = "/range",
    tag = "Products",
    params(RangeParams),
    responses(
        (status = 200, description = "Products priced within [min, max], streamed as a JSON array", body = Vec<ProductDto>),
        (status = 400, description = "Non-numeric min or max"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn get_products_in_range<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(range): Query<RangeParams>,
) -> ProductResult<impl IntoResponse> {
    let products = service.get_products_in_range(range.min, range.max).await?;
    Ok(JsonArrayStream(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/save",
    tag = "Products",
    request_body = ProductDto,
    responses(
        (status = 200, description = "The created product, with its assigned id", body = ProductDto),
        (status = 400, description = "Malformed request body"),
        (status = 409, description = "A product with this id already exists", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn save_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Json(dto): Json<ProductDto>,
) -> ProductResult<Json<ProductDto>> {
    let created = service.save_product(dto).await?;
    Ok(Json(created))
}

/// Update the product stored under the path id
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id; wins over any id in the body")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "The updated product, or an empty body when the id is unknown", body = ProductDto),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    Json(dto): Json<ProductDto>,
) -> ProductResult<Response> {
    let updated = service.update_product(dto, &id).await?;

    Ok(match updated {
        Some(dto) => Json(dto).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// Delete a product by id
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Deleted (or the id did not exist)"),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<StatusCode> {
    service.delete_product(&id).await?;
    Ok(StatusCode::OK)
}
