use crate::dto::{CartDto, CartItemPayload};
use crate::errors::{ApiError, ErrorResponse};
use crate::handlers::common::{success_response, validate_input, JsonBody};
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

/// The one cart every cart endpoint except `create` works on.
/// There is no user or session model to pick a cart per caller.
pub const DEMO_CART_ID: i32 = 1;

/// Creates the router for cart endpoints
pub fn carts_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/", get(get_cart))
        .route("/cart/create", post(create_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/remove", post(remove_from_cart))
        .route("/cart/update", post(update_cart_item))
}

/// Create a new, empty cart
#[utoipa::path(
    post,
    path = "/cart/create",
    tag = "cart",
    responses(
        (status = 200, description = "Cart created", body = CartDto)
    )
)]
pub async fn create_cart(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cart = state.services.cart.create_cart().await?;

    Ok(success_response(CartDto::from(cart)))
}

/// Get the cart with its items
#[utoipa::path(
    get,
    path = "/cart/",
    tag = "cart",
    responses(
        (status = 200, description = "Current cart", body = CartDto),
        (status = 404, description = "Cart not found", body = ErrorResponse)
    )
)]
pub async fn get_cart(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cart = state.services.cart.get_cart(DEMO_CART_ID).await?;

    Ok(success_response(CartDto::from(cart)))
}

/// Add a product to the cart, merging with an existing line
#[utoipa::path(
    post,
    path = "/cart/add",
    tag = "cart",
    request_body = CartItemPayload,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 400, description = "Out of stock, or cart or product not found", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CartItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let cart = state
        .services
        .cart
        .add_item(DEMO_CART_ID, payload.product_id, payload.quantity)
        .await?;

    Ok(success_response(CartDto::from(cart)))
}

/// Remove a product's line from the cart
#[utoipa::path(
    post,
    path = "/cart/remove",
    tag = "cart",
    request_body = CartItemPayload,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 404, description = "Item not in cart", body = ErrorResponse)
    )
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CartItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .services
        .cart
        .remove_item(DEMO_CART_ID, payload.product_id)
        .await?;

    Ok(success_response(CartDto::from(cart)))
}

/// Set the quantity of a cart line
#[utoipa::path(
    post,
    path = "/cart/update",
    tag = "cart",
    request_body = CartItemPayload,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 400, description = "Out of stock, or item not found", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    )
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CartItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let cart = state
        .services
        .cart
        .update_quantity(DEMO_CART_ID, payload.product_id, payload.quantity)
        .await?;

    Ok(success_response(CartDto::from(cart)))
}
