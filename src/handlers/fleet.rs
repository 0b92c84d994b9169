use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::entities::{airplane, airplane_type};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ensure_admin;
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AirplaneTypePayload {
    pub name: String,
}

pub async fn list_airplane_types(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<airplane_type::Model>>> {
    let types = airplane_type::Entity::find().all(&state.db).await?;
    Ok(Json(types))
}

pub async fn get_airplane_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<airplane_type::Model>> {
    let airplane_type = airplane_type::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane type not found".to_string()))?;

    Ok(Json(airplane_type))
}

pub async fn create_airplane_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AirplaneTypePayload>,
) -> AppResult<Json<airplane_type::Model>> {
    ensure_admin(&claims)?;

    let airplane_type = airplane_type::ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(airplane_type))
}

pub async fn update_airplane_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<AirplaneTypePayload>,
) -> AppResult<Json<airplane_type::Model>> {
    ensure_admin(&claims)?;

    let existing = airplane_type::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane type not found".to_string()))?;

    let mut airplane_type: airplane_type::ActiveModel = existing.into();
    airplane_type.name = Set(payload.name);
    let airplane_type = airplane_type.update(&state.db).await?;

    Ok(Json(airplane_type))
}

pub async fn delete_airplane_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_admin(&claims)?;

    let result = airplane_type::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Airplane type not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AirplanePayload {
    pub name: String,
    pub airplane_type: i32,
    pub rows: i32,
    pub seats_in_row: i32,
}

#[derive(Debug, Serialize)]
pub struct AirplaneListItem {
    pub id: i32,
    pub name: String,
    pub airplane_type: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
}

#[derive(Debug, Serialize)]
pub struct AirplaneDetail {
    pub id: i32,
    pub name: String,
    pub airplane_type: airplane_type::Model,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
}

/// List airplanes with the type name flattened in and capacity computed
pub async fn list_airplanes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AirplaneListItem>>> {
    let airplanes = airplane::Entity::find()
        .order_by_asc(airplane::Column::Id)
        .all(&state.db)
        .await?;

    let types = airplane_type::Entity::find().all(&state.db).await?;
    let type_map: HashMap<i32, airplane_type::Model> =
        types.into_iter().map(|t| (t.id, t)).collect();

    let items = airplanes
        .into_iter()
        .filter_map(|a| {
            let airplane_type = type_map.get(&a.airplane_type_id)?;
            Some(AirplaneListItem {
                id: a.id,
                name: a.name.clone(),
                airplane_type: airplane_type.name.clone(),
                rows: a.rows,
                seats_in_row: a.seats_in_row,
                capacity: a.capacity(),
            })
        })
        .collect();

    Ok(Json(items))
}

pub async fn get_airplane(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AirplaneDetail>> {
    let airplane = airplane::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane not found".to_string()))?;

    let airplane_type = airplane_type::Entity::find_by_id(airplane.airplane_type_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane type not found".to_string()))?;

    Ok(Json(AirplaneDetail {
        id: airplane.id,
        name: airplane.name.clone(),
        airplane_type,
        rows: airplane.rows,
        seats_in_row: airplane.seats_in_row,
        capacity: airplane.capacity(),
    }))
}

pub async fn create_airplane(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AirplanePayload>,
) -> AppResult<Json<airplane::Model>> {
    ensure_admin(&claims)?;
    validate_airplane(&state, &payload).await?;

    let airplane = airplane::ActiveModel {
        name: Set(payload.name),
        airplane_type_id: Set(payload.airplane_type),
        rows: Set(payload.rows),
        seats_in_row: Set(payload.seats_in_row),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(airplane))
}

pub async fn update_airplane(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<AirplanePayload>,
) -> AppResult<Json<airplane::Model>> {
    ensure_admin(&claims)?;

    let existing = airplane::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane not found".to_string()))?;

    validate_airplane(&state, &payload).await?;

    let mut airplane: airplane::ActiveModel = existing.into();
    airplane.name = Set(payload.name);
    airplane.airplane_type_id = Set(payload.airplane_type);
    airplane.rows = Set(payload.rows);
    airplane.seats_in_row = Set(payload.seats_in_row);
    let airplane = airplane.update(&state.db).await?;

    Ok(Json(airplane))
}

pub async fn delete_airplane(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_admin(&claims)?;

    let result = airplane::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Airplane not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn validate_airplane(state: &AppState, payload: &AirplanePayload) -> AppResult<()> {
    if payload.rows <= 0 {
        return Err(AppError::BadRequest(
            "rows must be a positive number".to_string(),
        ));
    }
    if payload.seats_in_row <= 0 {
        return Err(AppError::BadRequest(
            "seats_in_row must be a positive number".to_string(),
        ));
    }

    airplane_type::Entity::find_by_id(payload.airplane_type)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Airplane type does not exist".to_string()))?;

    Ok(())
}
