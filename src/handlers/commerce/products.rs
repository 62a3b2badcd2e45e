use crate::dto::{DetailResponse, ProductDto, ProductPayload};
use crate::errors::{ApiError, ErrorResponse};
use crate::handlers::common::{success_response, validate_input, JsonBody, PathParam};
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};

/// Creates the router for product endpoints, with and without the trailing slash
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products/",
    tag = "products",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product created", body = ProductDto),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let new_product = payload.into_new_product()?;

    let product = state.services.product.create_product(new_product).await?;

    Ok(success_response(ProductDto::from(product)))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products/",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = [ProductDto])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.services.product.list_products().await?;

    Ok(success_response(
        products.into_iter().map(ProductDto::from).collect::<Vec<_>>(),
    ))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.services.product.get_product(id).await?;

    Ok(success_response(ProductDto::from(product)))
}

/// Update a product. Fields missing from the body keep their stored value.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product = state
        .services
        .product
        .update_product(id, payload.into_changes())
        .await?;

    Ok(success_response(ProductDto::from(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DetailResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.product.delete_product(id).await?;

    Ok(success_response(DetailResponse::new("Product deleted")))
}
