pub use sea_orm_migration::prelude::*;

mod m20240315_000001_create_users;
mod m20240315_000002_create_airports;
mod m20240315_000003_create_routes;
mod m20240315_000004_create_airplane_types;
mod m20240315_000005_create_airplanes;
mod m20240315_000006_create_crew;
mod m20240315_000007_create_flights;
mod m20240315_000008_create_flight_crew;
mod m20240315_000009_create_orders;
mod m20240315_000010_create_tickets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240315_000001_create_users::Migration),
            Box::new(m20240315_000002_create_airports::Migration),
            Box::new(m20240315_000003_create_routes::Migration),
            Box::new(m20240315_000004_create_airplane_types::Migration),
            Box::new(m20240315_000005_create_airplanes::Migration),
            Box::new(m20240315_000006_create_crew::Migration),
            Box::new(m20240315_000007_create_flights::Migration),
            Box::new(m20240315_000008_create_flight_crew::Migration),
            Box::new(m20240315_000009_create_orders::Migration),
            Box::new(m20240315_000010_create_tickets::Migration),
        ]
    }
}
