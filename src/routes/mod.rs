use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{airports, auth, crew, fleet, flights, orders};
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::role_rate_limit::create_customer_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // IP-based governor for the unauthenticated endpoints
    let public_governor = create_public_governor();
    // Per-user governor for the order endpoints
    let customer_governor = create_customer_governor();

    // Public routes
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor);

    // Catalog and reference data (requires auth). Reads are open to any
    // authenticated user; the mutating handlers check the admin role
    // themselves since they share paths with the open reads.
    let catalog_routes = Router::new()
        // Airports
        .route("/airports", get(airports::list_airports))
        .route("/airports", post(airports::create_airport))
        .route("/airports/{id}", get(airports::get_airport))
        .route("/airports/{id}", put(airports::update_airport))
        .route("/airports/{id}", delete(airports::delete_airport))
        // Routes
        .route("/routes", get(airports::list_routes))
        .route("/routes", post(airports::create_route))
        .route("/routes/{id}", get(airports::get_route))
        .route("/routes/{id}", put(airports::update_route))
        .route("/routes/{id}", delete(airports::delete_route))
        // Airplane types
        .route("/airplane-types", get(fleet::list_airplane_types))
        .route("/airplane-types", post(fleet::create_airplane_type))
        .route("/airplane-types/{id}", get(fleet::get_airplane_type))
        .route("/airplane-types/{id}", put(fleet::update_airplane_type))
        .route("/airplane-types/{id}", delete(fleet::delete_airplane_type))
        // Airplanes
        .route("/airplanes", get(fleet::list_airplanes))
        .route("/airplanes", post(fleet::create_airplane))
        .route("/airplanes/{id}", get(fleet::get_airplane))
        .route("/airplanes/{id}", put(fleet::update_airplane))
        .route("/airplanes/{id}", delete(fleet::delete_airplane))
        // Flights
        .route("/flights", get(flights::list_flights))
        .route("/flights", post(flights::create_flight))
        .route("/flights/{id}", get(flights::get_flight))
        .route("/flights/{id}", put(flights::update_flight))
        .route("/flights/{id}", delete(flights::delete_flight))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Crew routes (requires auth + admin role, reads included)
    let crew_routes = Router::new()
        .route("/", get(crew::list_crew))
        .route("/", post(crew::create_crew_member))
        .route("/{id}", get(crew::get_crew_member))
        .route("/{id}", put(crew::update_crew_member))
        .route("/{id}", delete(crew::delete_crew_member))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Order routes (requires auth, owner-scoped)
    // Rate limit: 100 requests per minute per user
    let order_routes = Router::new()
        .route("/", get(orders::list_orders))
        .route("/", post(orders::create_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}", delete(orders::delete_order))
        .layer(customer_governor)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/crew", crew_routes)
        .nest("/api/orders", order_routes)
        .nest("/api", catalog_routes)
        .with_state(state)
}
