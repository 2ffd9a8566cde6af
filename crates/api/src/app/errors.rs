use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use beerstock_core::DomainError;
use beerstock_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::AlreadyExists(_)
        | DomainError::CapacityExceeded { .. }
        | DomainError::InsufficientStock { .. }
        | DomainError::Validation(_)
        | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
    };
    json_error(status, err.code(), err.to_string())
}

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
