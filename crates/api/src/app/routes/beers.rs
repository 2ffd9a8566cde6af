use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use beerstock_core::BeerId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_beers).post(create_beer))
        // A single segment is a name for GET and an id for DELETE.
        .route("/:key", get(get_beer_by_name).delete(delete_beer))
        .route("/:key/increment", patch(increment_stock))
        .route("/:key/decrement", patch(decrement_stock))
}

pub async fn create_beer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::BeerRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return bad_body(e),
    };
    let new_beer = match body.into_new_beer() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.beers().register(new_beer) {
        Ok(beer) => (StatusCode::CREATED, Json(dto::BeerResponse::from(&beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_beers(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.beers().list_all() {
        Ok(beers) => {
            let body: Vec<dto::BeerResponse> = beers.iter().map(dto::BeerResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_beer_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.beers().find_by_name(&name) {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(&beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.beers().delete_by_id(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn increment_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let (id, amount) = match parse_adjustment(&id, body) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.beers().increment(id, amount) {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(&beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn decrement_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let (id, amount) = match parse_adjustment(&id, body) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.beers().decrement(id, amount) {
        Ok(beer) => (StatusCode::OK, Json(dto::BeerResponse::from(&beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn parse_adjustment(
    id: &str,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> Result<(BeerId, i64), axum::response::Response> {
    let id: BeerId = id.parse().map_err(errors::domain_error_to_response)?;
    let Json(body) = body.map_err(bad_body)?;
    let amount = body.amount().map_err(errors::domain_error_to_response)?;
    Ok((id, amount))
}

fn bad_body(rejection: JsonRejection) -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}
