use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use catalog_products::Product;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body for create and update. Any client-supplied `id` is ignored: ids come
/// from the stores (create) or the path (update).
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl ProductRequest {
    pub fn into_product(self) -> Product {
        Product::new(self.name, self.description, self.price, self.stock)
    }
}

/// Turn a raw JSON body into a validated product, or a 400 response.
///
/// Runs before the coordinator is reached, so invalid input never touches a store.
pub fn parse_product(
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Product, axum::response::Response> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected product body");
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", rejection.body_text())
    })?;

    let product = request.into_product();
    product.validate().map_err(errors::domain_error_to_response)?;
    Ok(product)
}

// -------------------------
// Response helpers
// -------------------------

pub fn product_message(message: &str, product: &Product) -> serde_json::Value {
    serde_json::json!({
        "message": message,
        "product": product,
    })
}
