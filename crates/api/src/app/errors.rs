use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::CoordinatorError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    }
}

/// A failed coordinator write or listing. Always a 500: the coordinator does
/// not tell absence apart from outage on these paths.
pub fn store_error_to_response(err: &CoordinatorError, message: &'static str) -> axum::response::Response {
    tracing::error!(error = %err, store = %err.role(), "{message}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
}

/// A failed lookup: 404 when the final store reported absence, 500 otherwise.
pub fn lookup_error_to_response(err: &CoordinatorError, id: &str) -> axum::response::Response {
    if err.is_not_found() {
        return json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Product with ID {id} not found"),
        );
    }
    store_error_to_response(err, "Failed to retrieve product")
}

#[cfg(test)]
mod tests {
    use catalog_infra::repository::RepositoryError;
    use catalog_infra::{Operation, StoreRole};

    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let res = domain_error_to_response(DomainError::validation("name is required"));
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_lookup_maps_to_404() {
        let err = CoordinatorError::Secondary {
            op: Operation::Get,
            source: RepositoryError::NotFound("42".to_string()),
        };
        assert_eq!(lookup_error_to_response(&err, "42").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn backend_lookup_maps_to_500() {
        let err = CoordinatorError::Secondary {
            op: Operation::Get,
            source: RepositoryError::backend("timeout"),
        };
        assert_eq!(
            lookup_error_to_response(&err, "42").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_are_500_even_for_not_found() {
        let err = CoordinatorError::Primary {
            op: Operation::Delete,
            source: RepositoryError::NotFound("1".to_string()),
        };
        assert_eq!(err.role(), StoreRole::Primary);
        assert_eq!(
            store_error_to_response(&err, "Failed to delete product").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
