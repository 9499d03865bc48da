use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use drones_storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        drone::{CreateDroneRequest, DroneFilter, DroneResponse, UpdateDroneRequest},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::pagination::paginate;

use super::services;

#[utoipa::path(
    get,
    path = "/drones/",
    params(PaginationParams, DroneFilter),
    responses(
        (status = 200, description = "Page of drones", body = PaginatedResponse<DroneResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Invalid page")
    ),
    tag = "drones"
)]
pub async fn list_drones(
    State(db): State<Database>,
    uri: Uri,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
    filter: Result<Query<DroneFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(pagination) = pagination?;
    let Query(filter) = filter?;
    pagination.validate().map_err(WebError::BadRequest)?;

    let (drones, total_items) = services::list_drones(db.pool(), &filter, &pagination).await?;

    let response = paginate(&uri, &pagination, drones, total_items)?.map(DroneResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/drones/{id}/",
    params(
        ("id" = i64, Path, description = "Drone ID")
    ),
    responses(
        (status = 200, description = "Drone found", body = DroneResponse),
        (status = 404, description = "Drone not found")
    ),
    tag = "drones"
)]
pub async fn get_drone(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let drone = services::get_drone(db.pool(), id).await?;

    Ok(Json(DroneResponse::from(drone)).into_response())
}

#[utoipa::path(
    post,
    path = "/drones/",
    request_body = CreateDroneRequest,
    responses(
        (status = 201, description = "Drone created successfully", body = DroneResponse),
        (status = 400, description = "Validation error, duplicate name or unknown drone category")
    ),
    tag = "drones"
)]
pub async fn create_drone(
    State(db): State<Database>,
    payload: Result<Json<CreateDroneRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let drone = services::create_drone(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(DroneResponse::from(drone))).into_response())
}

#[utoipa::path(
    put,
    path = "/drones/{id}/",
    params(
        ("id" = i64, Path, description = "Drone ID")
    ),
    request_body = CreateDroneRequest,
    responses(
        (status = 200, description = "Drone replaced successfully", body = DroneResponse),
        (status = 400, description = "Validation error, duplicate name or unknown drone category"),
        (status = 404, description = "Drone not found")
    ),
    tag = "drones"
)]
pub async fn replace_drone(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateDroneRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let updated = services::replace_drone(db.pool(), id, &req).await?;

    Ok(Json(DroneResponse::from(updated)).into_response())
}

#[utoipa::path(
    patch,
    path = "/drones/{id}/",
    params(
        ("id" = i64, Path, description = "Drone ID")
    ),
    request_body = UpdateDroneRequest,
    responses(
        (status = 200, description = "Drone updated successfully", body = DroneResponse),
        (status = 400, description = "Validation error, duplicate name or unknown drone category"),
        (status = 404, description = "Drone not found")
    ),
    tag = "drones"
)]
pub async fn update_drone(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDroneRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_drone(db.pool(), id, &update_req).await?;

    Ok(Json(DroneResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/drones/{id}/",
    params(
        ("id" = i64, Path, description = "Drone ID")
    ),
    responses(
        (status = 204, description = "Drone deleted successfully"),
        (status = 404, description = "Drone not found")
    ),
    tag = "drones"
)]
pub async fn delete_drone(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    services::delete_drone(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
