use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for the catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .route("/stores/primary/products", get(products::list_primary_products))
        .route("/stores/secondary/products", get(products::list_secondary_products))
}
