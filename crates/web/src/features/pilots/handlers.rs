use axum::{
    Extension, Json,
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
        pilot::{CreatePilotRequest, PilotFilter, PilotResponse, UpdatePilotRequest},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthenticatedUser;
use crate::pagination::paginate;

use super::services;

#[utoipa::path(
    get,
    path = "/pilots/",
    params(PaginationParams, PilotFilter),
    security(
        ("token_auth" = [])
    ),
    responses(
        (status = 200, description = "Page of pilots", body = PaginatedResponse<PilotResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Invalid page")
    ),
    tag = "pilots"
)]
pub async fn list_pilots(
    State(db): State<Database>,
    uri: Uri,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
    filter: Result<Query<PilotFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(pagination) = pagination?;
    let Query(filter) = filter?;
    pagination.validate().map_err(WebError::BadRequest)?;

    let (pilots, total_items) = services::list_pilots(db.pool(), &filter, &pagination).await?;

    let response = paginate(&uri, &pagination, pilots, total_items)?.map(PilotResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/pilots/{id}/",
    params(
        ("id" = i64, Path, description = "Pilot ID")
    ),
    security(
        ("token_auth" = [])
    ),
    responses(
        (status = 200, description = "Pilot found", body = PilotResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pilot not found")
    ),
    tag = "pilots"
)]
pub async fn get_pilot(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let pilot = services::get_pilot(db.pool(), id).await?;

    Ok(Json(PilotResponse::from(pilot)).into_response())
}

#[utoipa::path(
    post,
    path = "/pilots/",
    request_body = CreatePilotRequest,
    security(
        ("token_auth" = [])
    ),
    responses(
        (status = 201, description = "Pilot created successfully", body = PilotResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "pilots"
)]
pub async fn create_pilot(
    State(db): State<Database>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreatePilotRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let pilot = services::create_pilot(db.pool(), &req).await?;
    tracing::info!(username = %user.username, pilot_id = pilot.id, "Pilot created");

    Ok((StatusCode::CREATED, Json(PilotResponse::from(pilot))).into_response())
}

#[utoipa::path(
    put,
    path = "/pilots/{id}/",
    params(
        ("id" = i64, Path, description = "Pilot ID")
    ),
    request_body = CreatePilotRequest,
    security(
        ("token_auth" = [])
    ),
    responses(
        (status = 200, description = "Pilot replaced successfully", body = PilotResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pilot not found")
    ),
    tag = "pilots"
)]
pub async fn replace_pilot(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreatePilotRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let updated = services::replace_pilot(db.pool(), id, &req).await?;

    Ok(Json(PilotResponse::from(updated)).into_response())
}

#[utoipa::path(
    patch,
    path = "/pilots/{id}/",
    params(
        ("id" = i64, Path, description = "Pilot ID")
    ),
    request_body = UpdatePilotRequest,
    security(
        ("token_auth" = [])
    ),
    responses(
        (status = 200, description = "Pilot updated successfully", body = PilotResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pilot not found")
    ),
    tag = "pilots"
)]
pub async fn update_pilot(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePilotRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_pilot(db.pool(), id, &update_req).await?;

    Ok(Json(PilotResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/pilots/{id}/",
    params(
        ("id" = i64, Path, description = "Pilot ID")
    ),
    security(
        ("token_auth" = [])
    ),
    responses(
        (status = 204, description = "Pilot and their competition records deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Pilot not found")
    ),
    tag = "pilots"
)]
pub async fn delete_pilot(
    State(db): State<Database>,
    Extension(user): Extension<AuthenticatedUser>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    services::delete_pilot(db.pool(), id).await?;
    tracing::info!(username = %user.username, pilot_id = id, "Pilot deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
