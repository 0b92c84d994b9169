//! Crew roster management. The whole resource, reads included, sits behind
//! the admin router guard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::entities::crew;
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CrewPayload {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct CrewResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<crew::Model> for CrewResponse {
    fn from(member: crew::Model) -> Self {
        let full_name = member.full_name();
        CrewResponse {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            full_name,
        }
    }
}

pub async fn list_crew(State(state): State<AppState>) -> AppResult<Json<Vec<CrewResponse>>> {
    let members = crew::Entity::find()
        .order_by_asc(crew::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(members.into_iter().map(CrewResponse::from).collect()))
}

pub async fn get_crew_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CrewResponse>> {
    let member = crew::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crew member not found".to_string()))?;

    Ok(Json(member.into()))
}

pub async fn create_crew_member(
    State(state): State<AppState>,
    Json(payload): Json<CrewPayload>,
) -> AppResult<Json<CrewResponse>> {
    let member = crew::ActiveModel {
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(member.into()))
}

pub async fn update_crew_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CrewPayload>,
) -> AppResult<Json<CrewResponse>> {
    let existing = crew::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Crew member not found".to_string()))?;

    let mut member: crew::ActiveModel = existing.into();
    member.first_name = Set(payload.first_name);
    member.last_name = Set(payload.last_name);
    let member = member.update(&state.db).await?;

    Ok(Json(member.into()))
}

pub async fn delete_crew_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let result = crew::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Crew member not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
