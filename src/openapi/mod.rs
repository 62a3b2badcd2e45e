use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shopcart API",
        version = "0.1.0",
        description = r#"
# Shopcart API

Product catalog and a single shopping cart over a relational store.

## Features

- **Products**: Create, list, fetch, update and delete catalog products
- **Cart**: Create a cart, add products, change quantities and remove lines

Cart operations check product stock but never decrement it.

## Error Handling

Failures return a JSON body with a human-readable `detail`:

```json
{
  "detail": "Product not found",
  "error": "Not Found",
  "request_id": "0b5e7c3a-8f5e-4a47-9d7c-6f1e2b7a9c10",
  "timestamp": "2024-06-01T10:30:00+00:00"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development")
    ),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "cart", description = "Shopping cart endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        // Products
        crate::handlers::commerce::products::create_product,
        crate::handlers::commerce::products::list_products,
        crate::handlers::commerce::products::get_product,
        crate::handlers::commerce::products::update_product,
        crate::handlers::commerce::products::delete_product,

        // Cart
        crate::handlers::commerce::carts::create_cart,
        crate::handlers::commerce::carts::get_cart,
        crate::handlers::commerce::carts::add_to_cart,
        crate::handlers::commerce::carts::remove_from_cart,
        crate::handlers::commerce::carts::update_cart_item,

        // Health
        crate::health::health_check
    ),
    components(
        schemas(
            crate::dto::ProductPayload,
            crate::dto::ProductDto,
            crate::dto::DetailResponse,
            crate::dto::CartItemPayload,
            crate::dto::CartItemDto,
            crate::dto::CartDto,
            crate::health::HealthInfo,
            crate::health::HealthStatus,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
