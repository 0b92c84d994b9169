pub mod airplane;
pub mod airplane_type;
pub mod airport;
pub mod crew;
pub mod flight;
pub mod flight_crew;
pub mod order;
pub mod route;
pub mod ticket;
pub mod user;
