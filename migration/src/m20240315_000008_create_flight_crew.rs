use sea_orm_migration::{prelude::*, schema::*};

use super::m20240315_000006_create_crew::Crew;
use super::m20240315_000007_create_flights::Flight;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FlightCrew::Table)
                    .if_not_exists()
                    .col(uuid(FlightCrew::FlightId).not_null())
                    .col(integer(FlightCrew::CrewId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_flight_crew")
                            .col(FlightCrew::FlightId)
                            .col(FlightCrew::CrewId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_crew_flight")
                            .from(FlightCrew::Table, FlightCrew::FlightId)
                            .to(Flight::Table, Flight::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_crew_crew")
                            .from(FlightCrew::Table, FlightCrew::CrewId)
                            .to(Crew::Table, Crew::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FlightCrew::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FlightCrew {
    Table,
    FlightId,
    CrewId,
}
