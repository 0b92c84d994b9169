use sea_orm_migration::{prelude::*, schema::*};

use super::m20240315_000002_create_airports::Airport;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Route::Table)
                    .if_not_exists()
                    .col(pk_auto(Route::Id))
                    .col(integer(Route::SourceAirportId).not_null())
                    .col(integer(Route::DestinationAirportId).not_null())
                    .col(integer(Route::Distance).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_route_source_airport")
                            .from(Route::Table, Route::SourceAirportId)
                            .to(Airport::Table, Airport::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_route_destination_airport")
                            .from(Route::Table, Route::DestinationAirportId)
                            .to(Airport::Table, Airport::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Route::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Route {
    Table,
    Id,
    SourceAirportId,
    DestinationAirportId,
    Distance,
}
