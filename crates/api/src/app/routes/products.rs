use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use catalog_infra::DualStoreCoordinator;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

pub async fn create_product(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let mut product = match dto::parse_product(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    if let Err(e) = coordinator.create_product(&mut product).await {
        return errors::store_error_to_response(&e, "Failed to create product");
    }

    (
        StatusCode::CREATED,
        Json(dto::product_message("Product successfully added", &product)),
    )
        .into_response()
}

/// Primary listing followed by secondary listing, as the coordinator returns it.
pub async fn list_products(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
) -> axum::response::Response {
    match coordinator.get_all_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(&e, "Failed to retrieve products"),
    }
}

pub async fn get_product(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match coordinator.get_product_by_id(&id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::lookup_error_to_response(&e, &id),
    }
}

pub async fn update_product(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let product = match dto::parse_product(body) {
        Ok(p) => p.with_id(id.clone()),
        Err(res) => return res,
    };

    // Existence pre-check; the coordinator itself never reports "not found" on writes.
    if let Err(e) = coordinator.get_product_by_id(&id).await {
        return errors::lookup_error_to_response(&e, &id);
    }

    if let Err(e) = coordinator.update_product(&id, &product).await {
        return errors::store_error_to_response(&e, "Failed to update product");
    }

    (
        StatusCode::OK,
        Json(dto::product_message("Product successfully updated", &product)),
    )
        .into_response()
}

pub async fn delete_product(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = coordinator.get_product_by_id(&id).await {
        return errors::lookup_error_to_response(&e, &id);
    }

    if let Err(e) = coordinator.delete_product(&id).await {
        return errors::store_error_to_response(&e, "Failed to delete product");
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Product successfully deleted" })),
    )
        .into_response()
}

pub async fn list_primary_products(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
) -> axum::response::Response {
    match coordinator.list_primary().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(&e, "Failed to retrieve primary products"),
    }
}

pub async fn list_secondary_products(
    Extension(coordinator): Extension<Arc<DualStoreCoordinator>>,
) -> axum::response::Response {
    match coordinator.list_secondary().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(&e, "Failed to retrieve secondary products"),
    }
}
