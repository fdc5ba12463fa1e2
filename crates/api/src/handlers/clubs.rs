//! Handlers for single-club CRUD.
//!
//! Club ids arrive as raw path segments so a non-numeric id can be answered
//! with the same JSON error shape as every other bad request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubdir_core::club::{ClubField, ClubFields, ClubRecord};
use clubdir_core::error::CoreError;
use clubdir_core::ingest::validate::missing_required_field;
use clubdir_core::types::DbId;
use clubdir_db::models::club::UpdateClub;
use clubdir_db::repositories::ClubRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClubCreated {
    pub message: &'static str,
    pub club: ClubRecord,
}

#[derive(Debug, Serialize)]
pub struct ClubDeleted {
    pub message: &'static str,
}

/// GET /clubs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ClubRecord>>> {
    let clubs = ClubRepo::list(&state.pool).await?;
    Ok(Json(clubs.into_iter().map(ClubRecord::from).collect()))
}

/// POST /addclub
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ClubFields>,
) -> AppResult<(StatusCode, Json<ClubCreated>)> {
    if let Some(field) = missing_required_field(&input) {
        return Err(required(field));
    }

    let club = ClubRepo::create(&state.pool, &input).await?;
    tracing::info!(id = club.id, college = %club.college_name, club = %club.club_name, "Club added");

    Ok((
        StatusCode::CREATED,
        Json(ClubCreated {
            message: "Club added successfully",
            club: club.into(),
        }),
    ))
}

/// PUT /updateclub/{id}
///
/// Only the keys present in the body are changed, but College Name and
/// Club Name must always be supplied and non-empty.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateClub>,
) -> AppResult<Json<ClubRecord>> {
    let id = parse_id(&raw_id)?;

    for (field, value) in [
        (ClubField::CollegeName, &input.college_name),
        (ClubField::ClubName, &input.club_name),
    ] {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            return Err(required(field));
        }
    }

    let club = ClubRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Club", id }))?;
    Ok(Json(club.into()))
}

/// DELETE /deleteclub/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ClubDeleted>> {
    let id = parse_id(&raw_id)?;

    if !ClubRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Club", id }));
    }

    tracing::info!(id, "Club deleted");
    Ok(Json(ClubDeleted {
        message: "Club deleted successfully",
    }))
}

fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid club id: {raw}")))
}

fn required(field: ClubField) -> AppError {
    AppError::Core(CoreError::Validation(format!("{field} is required")))
}
