use sea_orm_migration::{prelude::*, schema::*};

use super::m20240315_000003_create_routes::Route;
use super::m20240315_000005_create_airplanes::Airplane;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flight::Table)
                    .if_not_exists()
                    .col(uuid(Flight::Id).primary_key())
                    .col(timestamp_with_time_zone(Flight::DepartureTime).not_null())
                    .col(timestamp_with_time_zone(Flight::ArrivalTime).not_null())
                    .col(integer(Flight::AirplaneId).not_null())
                    .col(integer(Flight::RouteId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_airplane")
                            .from(Flight::Table, Flight::AirplaneId)
                            .to(Airplane::Table, Airplane::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_route")
                            .from(Flight::Table, Flight::RouteId)
                            .to(Route::Table, Route::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flight::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Flight {
    Table,
    Id,
    DepartureTime,
    ArrivalTime,
    AirplaneId,
    RouteId,
}
