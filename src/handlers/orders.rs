//! Order creation and owner-scoped order reads.
//!
//! An order and all of its tickets are written in a single transaction. Every
//! ticket request is re-checked against the ledger inside that transaction, so
//! a duplicate earlier in the same batch is caught the same way as a committed
//! one. A unique-index violation at insert time (a concurrent order won the
//! seat) surfaces as the same rejection, tagged with the request index.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{airplane, airport, flight, order, route, ticket};
use crate::error::{AppError, AppResult};
use crate::seating::{check_seat, SeatRejection};
use crate::utils::jwt::Claims;
use crate::utils::labels::flight_label;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    pub flight: Uuid,
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub tickets: Vec<TicketRequest>,
}

#[derive(Debug, Serialize)]
pub struct TicketInfo {
    pub id: Uuid,
    pub flight: String,
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub created_at: chrono::DateTime<Utc>,
    pub tickets: Vec<TicketInfo>,
}

/// List the caller's orders, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = order::Entity::find()
        .filter(order::Column::UserId.eq(claims.sub))
        .order_by_desc(order::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let tickets = ticket::Entity::find()
        .filter(ticket::Column::OrderId.is_in(order_ids))
        .order_by_asc(ticket::Column::Row)
        .order_by_asc(ticket::Column::Seat)
        .all(&state.db)
        .await?;

    let labels = flight_labels(&state.db, tickets.iter().map(|t| t.flight_id)).await?;

    let responses = orders
        .into_iter()
        .map(|o| {
            let tickets = tickets
                .iter()
                .filter(|t| t.order_id == o.id)
                .map(|t| ticket_info(t, &labels))
                .collect();
            OrderResponse {
                id: o.id,
                created_at: o.created_at.with_timezone(&Utc),
                tickets,
            }
        })
        .collect();

    Ok(Json(responses))
}

/// Order detail; someone else's order reads as 404
pub async fn get_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderResponse>> {
    let order = order::Entity::find_by_id(id)
        .filter(order::Column::UserId.eq(claims.sub))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    let tickets = ticket::Entity::find()
        .filter(ticket::Column::OrderId.eq(order.id))
        .order_by_asc(ticket::Column::Row)
        .order_by_asc(ticket::Column::Seat)
        .all(&state.db)
        .await?;

    let labels = flight_labels(&state.db, tickets.iter().map(|t| t.flight_id)).await?;

    Ok(Json(OrderResponse {
        id: order.id,
        created_at: order.created_at.with_timezone(&Utc),
        tickets: tickets.iter().map(|t| ticket_info(t, &labels)).collect(),
    }))
}

/// Create an order with its tickets in one transaction
pub async fn create_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    if payload.tickets.is_empty() {
        return Err(AppError::BadRequest(
            "An order must contain at least one ticket".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let order = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(claims.sub),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    let mut created = Vec::with_capacity(payload.tickets.len());
    for (index, request) in payload.tickets.iter().enumerate() {
        let flight = flight::Entity::find_by_id(request.flight)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Flight {} not found", request.flight))
            })?;
        let airplane = airplane::Entity::find_by_id(flight.airplane_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Airplane not found".to_string()))?;

        check_seat(airplane.rows, airplane.seats_in_row, request.row, request.seat)
            .map_err(|rejection| AppError::TicketRejected { index, rejection })?;

        // Sees both committed tickets and earlier inserts from this batch
        let taken = ticket::Entity::find()
            .filter(ticket::Column::FlightId.eq(flight.id))
            .filter(ticket::Column::Row.eq(request.row))
            .filter(ticket::Column::Seat.eq(request.seat))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(AppError::TicketRejected {
                index,
                rejection: SeatRejection::DuplicateSeat,
            });
        }

        let inserted = ticket::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            flight_id: Set(flight.id),
            row: Set(request.row),
            seat: Set(request.seat),
        }
        .insert(&txn)
        .await;

        // A concurrent order can win the seat between our check and this
        // insert; the unique index reports it as a constraint violation.
        let ticket = match inserted {
            Ok(ticket) => ticket,
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    return Err(AppError::TicketRejected {
                        index,
                        rejection: SeatRejection::DuplicateSeat,
                    });
                }
                _ => return Err(err.into()),
            },
        };
        created.push(ticket);
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %claims.sub,
        tickets = created.len(),
        "Order created"
    );

    let labels = flight_labels(&state.db, created.iter().map(|t| t.flight_id)).await?;

    Ok(Json(OrderResponse {
        id: order.id,
        created_at: order.created_at.with_timezone(&Utc),
        tickets: created.iter().map(|t| ticket_info(t, &labels)).collect(),
    }))
}

/// Delete the caller's order; its tickets go with it via the cascade
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let result = order::Entity::delete_many()
        .filter(order::Column::Id.eq(id))
        .filter(order::Column::UserId.eq(claims.sub))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Order not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn ticket_info(ticket: &ticket::Model, labels: &HashMap<Uuid, String>) -> TicketInfo {
    TicketInfo {
        id: ticket.id,
        flight: labels
            .get(&ticket.flight_id)
            .cloned()
            .unwrap_or_else(|| ticket.flight_id.to_string()),
        row: ticket.row,
        seat: ticket.seat,
    }
}

/// Render "source -> destination (km) (departure)" labels for a set of flights
async fn flight_labels<C: ConnectionTrait>(
    db: &C,
    flight_ids: impl Iterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, String>> {
    let ids: Vec<Uuid> = flight_ids.collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let flights = flight::Entity::find()
        .filter(flight::Column::Id.is_in(ids))
        .all(db)
        .await?;
    let routes: HashMap<i32, route::Model> = route::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let airports: HashMap<i32, airport::Model> = airport::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let mut labels = HashMap::new();
    for f in flights {
        let Some(route) = routes.get(&f.route_id) else {
            continue;
        };
        let (Some(source), Some(destination)) = (
            airports.get(&route.source_airport_id),
            airports.get(&route.destination_airport_id),
        ) else {
            continue;
        };
        labels.insert(
            f.id,
            flight_label(
                source,
                destination,
                route.distance,
                f.departure_time.with_timezone(&Utc),
            ),
        );
    }

    Ok(labels)
}
