use sea_orm_migration::{prelude::*, schema::*};

use super::m20240315_000007_create_flights::Flight;
use super::m20240315_000009_create_orders::Order;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(uuid(Ticket::Id).primary_key())
                    .col(uuid(Ticket::OrderId).not_null())
                    .col(uuid(Ticket::FlightId).not_null())
                    .col(integer(Ticket::Row).not_null())
                    .col(integer(Ticket::Seat).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_order")
                            .from(Ticket::Table, Ticket::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_flight")
                            .from(Ticket::Table, Ticket::FlightId)
                            .to(Flight::Table, Flight::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The unique index is the real double-booking guarantee; the handler
        // pre-check can race between two concurrent transactions.
        manager
            .create_index(
                Index::create()
                    .name("uq_ticket_flight_row_seat")
                    .table(Ticket::Table)
                    .col(Ticket::FlightId)
                    .col(Ticket::Row)
                    .col(Ticket::Seat)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uq_ticket_flight_row_seat").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    OrderId,
    FlightId,
    Row,
    Seat,
}
