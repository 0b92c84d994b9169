use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::entities::{airport, flight, route};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ensure_admin;
use crate::utils::jwt::Claims;
use crate::utils::labels::{flight_label, route_label};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AirportPayload {
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Serialize)]
pub struct AirportDetail {
    pub id: i32,
    pub name: String,
    pub closest_big_city: String,
    pub routes_as_source: Vec<String>,
    pub routes_as_destination: Vec<String>,
}

/// List airports, alphabetically
pub async fn list_airports(State(state): State<AppState>) -> AppResult<Json<Vec<airport::Model>>> {
    let airports = airport::Entity::find()
        .order_by_asc(airport::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(airports))
}

/// Airport detail with the routes it participates in, rendered as labels
pub async fn get_airport(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AirportDetail>> {
    let airport = airport::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airport not found".to_string()))?;

    let touching = route::Entity::find()
        .filter(
            Condition::any()
                .add(route::Column::SourceAirportId.eq(id))
                .add(route::Column::DestinationAirportId.eq(id)),
        )
        .order_by_asc(route::Column::SourceAirportId)
        .order_by_asc(route::Column::DestinationAirportId)
        .all(&state.db)
        .await?;

    let airport_map = load_airport_map(&state).await?;

    let mut routes_as_source = Vec::new();
    let mut routes_as_destination = Vec::new();
    for r in &touching {
        let (Some(source), Some(destination)) = (
            airport_map.get(&r.source_airport_id),
            airport_map.get(&r.destination_airport_id),
        ) else {
            continue;
        };
        let label = route_label(source, destination, r.distance);
        if r.source_airport_id == id {
            routes_as_source.push(label.clone());
        }
        if r.destination_airport_id == id {
            routes_as_destination.push(label);
        }
    }

    Ok(Json(AirportDetail {
        id: airport.id,
        name: airport.name,
        closest_big_city: airport.closest_big_city,
        routes_as_source,
        routes_as_destination,
    }))
}

pub async fn create_airport(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AirportPayload>,
) -> AppResult<Json<airport::Model>> {
    ensure_admin(&claims)?;

    let airport = airport::ActiveModel {
        name: Set(payload.name),
        closest_big_city: Set(payload.closest_big_city),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(airport))
}

pub async fn update_airport(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<AirportPayload>,
) -> AppResult<Json<airport::Model>> {
    ensure_admin(&claims)?;

    let existing = airport::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airport not found".to_string()))?;

    let mut airport: airport::ActiveModel = existing.into();
    airport.name = Set(payload.name);
    airport.closest_big_city = Set(payload.closest_big_city);
    let airport = airport.update(&state.db).await?;

    Ok(Json(airport))
}

pub async fn delete_airport(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_admin(&claims)?;

    let result = airport::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Airport not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct RoutePayload {
    pub source: i32,
    pub destination: i32,
    pub distance: i32,
}

#[derive(Debug, Serialize)]
pub struct RouteListItem {
    pub id: i32,
    pub source: String,
    pub destination: String,
    pub distance: i32,
}

#[derive(Debug, Serialize)]
pub struct RouteDetail {
    pub id: i32,
    pub source: airport::Model,
    pub destination: airport::Model,
    pub distance: i32,
    pub flights: Vec<String>,
}

/// List routes with airport names flattened in
pub async fn list_routes(State(state): State<AppState>) -> AppResult<Json<Vec<RouteListItem>>> {
    let routes = route::Entity::find()
        .order_by_asc(route::Column::SourceAirportId)
        .order_by_asc(route::Column::DestinationAirportId)
        .all(&state.db)
        .await?;

    let airport_map = load_airport_map(&state).await?;

    let items = routes
        .into_iter()
        .filter_map(|r| {
            let source = airport_map.get(&r.source_airport_id)?;
            let destination = airport_map.get(&r.destination_airport_id)?;
            Some(RouteListItem {
                id: r.id,
                source: source.name.clone(),
                destination: destination.name.clone(),
                distance: r.distance,
            })
        })
        .collect();

    Ok(Json(items))
}

/// Route detail with full airport objects and the route's flights as labels
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RouteDetail>> {
    let route = route::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    let source = airport::Entity::find_by_id(route.source_airport_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Source airport not found".to_string()))?;
    let destination = airport::Entity::find_by_id(route.destination_airport_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Destination airport not found".to_string()))?;

    let flights = flight::Entity::find()
        .filter(flight::Column::RouteId.eq(id))
        .order_by_desc(flight::Column::DepartureTime)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|f| {
            flight_label(
                &source,
                &destination,
                route.distance,
                f.departure_time.with_timezone(&Utc),
            )
        })
        .collect();

    Ok(Json(RouteDetail {
        id: route.id,
        source,
        destination,
        distance: route.distance,
        flights,
    }))
}

pub async fn create_route(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RoutePayload>,
) -> AppResult<Json<route::Model>> {
    ensure_admin(&claims)?;
    validate_route(&state, &payload).await?;

    let route = route::ActiveModel {
        source_airport_id: Set(payload.source),
        destination_airport_id: Set(payload.destination),
        distance: Set(payload.distance),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok(Json(route))
}

pub async fn update_route(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<RoutePayload>,
) -> AppResult<Json<route::Model>> {
    ensure_admin(&claims)?;

    let existing = route::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    validate_route(&state, &payload).await?;

    let mut route: route::ActiveModel = existing.into();
    route.source_airport_id = Set(payload.source);
    route.destination_airport_id = Set(payload.destination);
    route.distance = Set(payload.distance);
    let route = route.update(&state.db).await?;

    Ok(Json(route))
}

pub async fn delete_route(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ensure_admin(&claims)?;

    let result = route::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Route not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn validate_route(state: &AppState, payload: &RoutePayload) -> AppResult<()> {
    if payload.distance <= 0 {
        return Err(AppError::BadRequest(
            "distance must be a positive number of kilometers".to_string(),
        ));
    }

    airport::Entity::find_by_id(payload.source)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Source airport does not exist".to_string()))?;
    airport::Entity::find_by_id(payload.destination)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Destination airport does not exist".to_string()))?;

    Ok(())
}

async fn load_airport_map(state: &AppState) -> AppResult<HashMap<i32, airport::Model>> {
    let airports = airport::Entity::find().all(&state.db).await?;
    Ok(airports.into_iter().map(|a| (a.id, a)).collect())
}
