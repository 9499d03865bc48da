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
        competition::{
            CompetitionFilter, CompetitionResponse, CreateCompetitionRequest,
            UpdateCompetitionRequest,
        },
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::pagination::paginate;

use super::services;

#[utoipa::path(
    get,
    path = "/competitions/",
    params(PaginationParams, CompetitionFilter),
    responses(
        (status = 200, description = "Page of competitions, longest distance first by default", body = PaginatedResponse<CompetitionResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Invalid page")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
    uri: Uri,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
    filter: Result<Query<CompetitionFilter>, QueryRejection>,
) -> Result<Response, WebError> {
    let Query(pagination) = pagination?;
    let Query(filter) = filter?;
    pagination.validate().map_err(WebError::BadRequest)?;
    filter.validate().map_err(WebError::BadRequest)?;

    let (competitions, total_items) =
        services::list_competitions(db.pool(), &filter, &pagination).await?;

    let response = paginate(&uri, &pagination, competitions, total_items)?
        .map(CompetitionResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/competitions/{id}/",
    params(
        ("id" = i64, Path, description = "Competition ID")
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let competition = services::get_competition(db.pool(), id).await?;

    Ok(Json(CompetitionResponse::from(competition)).into_response())
}

#[utoipa::path(
    post,
    path = "/competitions/",
    request_body = CreateCompetitionRequest,
    responses(
        (status = 201, description = "Competition created successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error or unknown pilot/drone")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<Database>,
    payload: Result<Json<CreateCompetitionRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let competition = services::create_competition(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CompetitionResponse::from(competition)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/competitions/{id}/",
    params(
        ("id" = i64, Path, description = "Competition ID")
    ),
    request_body = CreateCompetitionRequest,
    responses(
        (status = 200, description = "Competition replaced successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error or unknown pilot/drone"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn replace_competition(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateCompetitionRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let updated = services::replace_competition(db.pool(), id, &req).await?;

    Ok(Json(CompetitionResponse::from(updated)).into_response())
}

#[utoipa::path(
    patch,
    path = "/competitions/{id}/",
    params(
        ("id" = i64, Path, description = "Competition ID")
    ),
    request_body = UpdateCompetitionRequest,
    responses(
        (status = 200, description = "Competition updated successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error or unknown pilot/drone"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateCompetitionRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_competition(db.pool(), id, &update_req).await?;

    Ok(Json(CompetitionResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/competitions/{id}/",
    params(
        ("id" = i64, Path, description = "Competition ID")
    ),
    responses(
        (status = 204, description = "Competition deleted successfully"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = path?;
    services::delete_competition(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
