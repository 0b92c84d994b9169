use sea_orm_migration::{prelude::*, schema::*};

use super::m20240315_000004_create_airplane_types::AirplaneType;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Airplane::Table)
                    .if_not_exists()
                    .col(pk_auto(Airplane::Id))
                    .col(string_len(Airplane::Name, 255).not_null())
                    .col(integer(Airplane::AirplaneTypeId).not_null())
                    .col(integer(Airplane::Rows).not_null())
                    .col(integer(Airplane::SeatsInRow).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_airplane_airplane_type")
                            .from(Airplane::Table, Airplane::AirplaneTypeId)
                            .to(AirplaneType::Table, AirplaneType::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Airplane::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Airplane {
    Table,
    Id,
    Name,
    AirplaneTypeId,
    Rows,
    SeatsInRow,
}
