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
        drone_category::{
            CreateDroneCategoryRequest, DroneCategoryFilter, DroneCategoryResponse,
            UpdateDroneCategoryRequest,
        },
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::pagination::paginate;

use super::services;

#[utoipa::path(
    get,
    path = "/drone-categories/",
    params(PaginationParams, DroneCategoryFilter),
    responses(
        (status = 200, description = "Page of drone categories", body = PaginatedResponse<DroneCategoryResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Invalid page")
    ),
    tag = "drone-categories"
)]
pub async fn list_drone_categories(
    State(db): State<Database>,
    uri: Uri,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
    filter: Result<Query<DroneCategoryFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(pagination) = pagination?;
    let Query(filter) = filter?;
    pagination.validate().map_err(WebError::BadRequest)?;

    let (categories, total_items) =
        services::list_drone_categories(db.pool(), &filter, &pagination).await?;

    let response = paginate(&uri, &pagination, categories, total_items)?
        .map(DroneCategoryResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/drone-categories/{id}/",
    params(
        ("id" = i64, Path, description = "Drone category ID")
    ),
    responses(
        (status = 200, description = "Drone category found", body = DroneCategoryResponse),
        (status = 404, description = "Drone category not found")
    ),
    tag = "drone-categories"
)]
pub async fn get_drone_category(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let category = services::get_drone_category(db.pool(), id).await?;

    Ok(Json(DroneCategoryResponse::from(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/drone-categories/",
    request_body = CreateDroneCategoryRequest,
    responses(
        (status = 201, description = "Drone category created successfully", body = DroneCategoryResponse),
        (status = 400, description = "Validation error or duplicate name")
    ),
    tag = "drone-categories"
)]
pub async fn create_drone_category(
    State(db): State<Database>,
    payload: Result<Json<CreateDroneCategoryRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let category = services::create_drone_category(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(DroneCategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    put,
    path = "/drone-categories/{id}/",
    params(
        ("id" = i64, Path, description = "Drone category ID")
    ),
    request_body = CreateDroneCategoryRequest,
    responses(
        (status = 200, description = "Drone category replaced successfully", body = DroneCategoryResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 404, description = "Drone category not found")
    ),
    tag = "drone-categories"
)]
pub async fn replace_drone_category(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateDroneCategoryRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let updated = services::replace_drone_category(db.pool(), id, &req).await?;

    Ok(Json(DroneCategoryResponse::from(updated)).into_response())
}

#[utoipa::path(
    patch,
    path = "/drone-categories/{id}/",
    params(
        ("id" = i64, Path, description = "Drone category ID")
    ),
    request_body = UpdateDroneCategoryRequest,
    responses(
        (status = 200, description = "Drone category updated successfully", body = DroneCategoryResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 404, description = "Drone category not found")
    ),
    tag = "drone-categories"
)]
pub async fn update_drone_category(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateDroneCategoryRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_drone_category(db.pool(), id, &update_req).await?;

    Ok(Json(DroneCategoryResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/drone-categories/{id}/",
    params(
        ("id" = i64, Path, description = "Drone category ID")
    ),
    responses(
        (status = 204, description = "Drone category and its drones deleted successfully"),
        (status = 404, description = "Drone category not found")
    ),
    tag = "drone-categories"
)]
pub async fn delete_drone_category(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    services::delete_drone_category(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
