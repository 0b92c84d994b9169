use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{airplane, airplane_type, airport, crew, flight, flight_crew, route, ticket};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ensure_admin;
use crate::seating::tickets_available;
use crate::utils::jwt::Claims;
use crate::utils::labels::route_label;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FlightSearchParams {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Whether a flight passes the catalog filters. Name filters are
/// case-insensitive substring matches on the endpoint airport names; the date
/// filter compares against the departure's UTC calendar date. All filters are
/// optional and AND-combine.
pub fn matches_search(
    source_name: &str,
    destination_name: &str,
    departure_time: DateTime<Utc>,
    params: &FlightSearchParams,
) -> bool {
    if let Some(query) = &params.source {
        if !source_name.to_lowercase().contains(&query.to_lowercase()) {
            return false;
        }
    }
    if let Some(query) = &params.destination {
        if !destination_name
            .to_lowercase()
            .contains(&query.to_lowercase())
        {
            return false;
        }
    }
    if let Some(date) = params.date {
        if departure_time.date_naive() != date {
            return false;
        }
    }
    true
}

#[derive(Debug, Serialize)]
pub struct FlightListItem {
    pub id: Uuid,
    pub route: String,
    pub airplane: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub capacity: i32,
    pub tickets_available: i32,
}

#[derive(Debug, Serialize)]
pub struct FlightAirplane {
    pub id: i32,
    pub name: String,
    pub airplane_type: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
}

#[derive(Debug, Serialize)]
pub struct FlightCrewMember {
    pub id: i32,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct SeatRef {
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize)]
pub struct FlightDetail {
    pub id: Uuid,
    pub route: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub airplane: FlightAirplane,
    pub crew: Vec<FlightCrewMember>,
    pub taken_seats: Vec<SeatRef>,
}

/// Search the flight catalog, newest departures first
pub async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<FlightSearchParams>,
) -> AppResult<Json<Vec<FlightListItem>>> {
    let flights = flight::Entity::find()
        .order_by_desc(flight::Column::DepartureTime)
        .all(&state.db)
        .await?;

    let routes: HashMap<i32, route::Model> = route::Entity::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let airports: HashMap<i32, airport::Model> = airport::Entity::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let airplanes: HashMap<i32, airplane::Model> = airplane::Entity::find()
        .all(&state.db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let mut items = Vec::new();
    for f in flights {
        let (Some(route), Some(airplane)) = (routes.get(&f.route_id), airplanes.get(&f.airplane_id))
        else {
            continue;
        };
        let (Some(source), Some(destination)) = (
            airports.get(&route.source_airport_id),
            airports.get(&route.destination_airport_id),
        ) else {
            continue;
        };

        let departure = f.departure_time.with_timezone(&Utc);
        if !matches_search(&source.name, &destination.name, departure, &params) {
            continue;
        }

        let tickets_sold = ticket::Entity::find()
            .filter(ticket::Column::FlightId.eq(f.id))
            .count(&state.db)
            .await? as i32;

        items.push(FlightListItem {
            id: f.id,
            route: route_label(source, destination, route.distance),
            airplane: airplane.name.clone(),
            departure_time: departure,
            arrival_time: f.arrival_time.with_timezone(&Utc),
            capacity: airplane.capacity(),
            tickets_available: tickets_available(airplane.capacity(), tickets_sold),
        });
    }

    Ok(Json(items))
}

/// Flight detail with nested airplane, crew, and the seats already taken
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FlightDetail>> {
    let flight = flight::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    let route = route::Entity::find_by_id(flight.route_id)
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

    let airplane = airplane::Entity::find_by_id(flight.airplane_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane not found".to_string()))?;
    let airplane_type = airplane_type::Entity::find_by_id(airplane.airplane_type_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Airplane type not found".to_string()))?;

    let crew = flight
        .find_related(crew::Entity)
        .order_by_asc(crew::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|member| FlightCrewMember {
            id: member.id,
            full_name: member.full_name(),
        })
        .collect();

    let taken_seats = ticket::Entity::find()
        .filter(ticket::Column::FlightId.eq(flight.id))
        .order_by_asc(ticket::Column::Row)
        .order_by_asc(ticket::Column::Seat)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|t| SeatRef {
            row: t.row,
            seat: t.seat,
        })
        .collect();

    Ok(Json(FlightDetail {
        id: flight.id,
        route: route_label(&source, &destination, route.distance),
        departure_time: flight.departure_time.with_timezone(&Utc),
        arrival_time: flight.arrival_time.with_timezone(&Utc),
        airplane: FlightAirplane {
            id: airplane.id,
            name: airplane.name.clone(),
            airplane_type: airplane_type.name,
            rows: airplane.rows,
            seats_in_row: airplane.seats_in_row,
            capacity: airplane.capacity(),
        },
        crew,
        taken_seats,
    }))
}

#[derive(Debug, Deserialize)]
pub struct FlightPayload {
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub airplane: i32,
    pub route: i32,
    pub crew: Option<Vec<i32>>,
}

pub async fn create_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<FlightPayload>,
) -> AppResult<Json<flight::Model>> {
    ensure_admin(&claims)?;
    validate_flight(&state, &payload).await?;

    let txn = state.db.begin().await?;

    let flight = flight::ActiveModel {
        id: Set(Uuid::new_v4()),
        departure_time: Set(payload.departure_time.into()),
        arrival_time: Set(payload.arrival_time.into()),
        airplane_id: Set(payload.airplane),
        route_id: Set(payload.route),
    }
    .insert(&txn)
    .await?;

    for crew_id in payload.crew.unwrap_or_default() {
        flight_crew::ActiveModel {
            flight_id: Set(flight.id),
            crew_id: Set(crew_id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(Json(flight))
}

pub async fn update_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FlightPayload>,
) -> AppResult<Json<flight::Model>> {
    ensure_admin(&claims)?;

    let existing = flight::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    validate_flight(&state, &payload).await?;

    let txn = state.db.begin().await?;

    let mut flight: flight::ActiveModel = existing.into();
    flight.departure_time = Set(payload.departure_time.into());
    flight.arrival_time = Set(payload.arrival_time.into());
    flight.airplane_id = Set(payload.airplane);
    flight.route_id = Set(payload.route);
    let flight = flight.update(&txn).await?;

    // Replace the roster wholesale when the payload names one
    if let Some(crew_ids) = payload.crew {
        flight_crew::Entity::delete_many()
            .filter(flight_crew::Column::FlightId.eq(flight.id))
            .exec(&txn)
            .await?;
        for crew_id in crew_ids {
            flight_crew::ActiveModel {
                flight_id: Set(flight.id),
                crew_id: Set(crew_id),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    Ok(Json(flight))
}

pub async fn delete_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ensure_admin(&claims)?;

    let result = flight::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Flight not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn validate_flight(state: &AppState, payload: &FlightPayload) -> AppResult<()> {
    if payload.arrival_time <= payload.departure_time {
        return Err(AppError::BadRequest(
            "arrival_time must be after departure_time".to_string(),
        ));
    }

    airplane::Entity::find_by_id(payload.airplane)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Airplane does not exist".to_string()))?;
    route::Entity::find_by_id(payload.route)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Route does not exist".to_string()))?;

    if let Some(crew_ids) = &payload.crew {
        let found = crew::Entity::find()
            .filter(crew::Column::Id.is_in(crew_ids.clone()))
            .count(&state.db)
            .await?;
        if found as usize != crew_ids.len() {
            return Err(AppError::BadRequest(
                "One or more crew members do not exist".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap()
    }

    #[test]
    fn no_filters_matches_everything() {
        let params = FlightSearchParams::default();
        assert!(matches_search("JFK Airport", "LAX Airport", departure(), &params));
    }

    #[test]
    fn source_filter_is_case_insensitive_substring() {
        let params = FlightSearchParams {
            source: Some("jfk".to_string()),
            ..Default::default()
        };
        assert!(matches_search("JFK Airport", "LAX Airport", departure(), &params));

        let params = FlightSearchParams {
            source: Some("heathrow".to_string()),
            ..Default::default()
        };
        assert!(!matches_search("JFK Airport", "LAX Airport", departure(), &params));
    }

    #[test]
    fn destination_filter_matches_the_other_endpoint() {
        let params = FlightSearchParams {
            destination: Some("lax".to_string()),
            ..Default::default()
        };
        assert!(matches_search("JFK Airport", "LAX Airport", departure(), &params));
        assert!(!matches_search("LAX Airport", "JFK Airport", departure(), &params));
    }

    #[test]
    fn date_filter_compares_the_utc_calendar_date() {
        let params = FlightSearchParams {
            date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            ..Default::default()
        };
        assert!(matches_search("JFK Airport", "LAX Airport", departure(), &params));

        let params = FlightSearchParams {
            date: Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
            ..Default::default()
        };
        assert!(!matches_search("JFK Airport", "LAX Airport", departure(), &params));
    }

    #[test]
    fn filters_and_combine() {
        let params = FlightSearchParams {
            source: Some("jfk".to_string()),
            destination: Some("lax".to_string()),
            date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        };
        assert!(matches_search("JFK Airport", "LAX Airport", departure(), &params));

        // One failing filter sinks the whole match
        let params = FlightSearchParams {
            source: Some("jfk".to_string()),
            destination: Some("heathrow".to_string()),
            date: Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        };
        assert!(!matches_search("JFK Airport", "LAX Airport", departure(), &params));
    }
}
