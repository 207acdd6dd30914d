//! Entry tables.
//!
//! Creates `ingressos` and `registros`, which share one shape:
//!
//! - `code_scale`: string primary key
//! - `code_project`: string
//! - `entry_date`: ISO `YYYY-MM-DD` string
//! - `entered_amount`: double
//!
//! Tables written by other tools before the first run are left untouched.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Ingressos {
    Table,
}

#[derive(Iden)]
enum Registros {
    Table,
}

#[derive(Iden)]
enum Entries {
    CodeScale,
    CodeProject,
    EntryDate,
    EnteredAmount,
}

fn entries_table<T: IntoTableRef>(table: T) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Entries::CodeScale)
                .string()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Entries::CodeProject).string().not_null())
        .col(ColumnDef::new(Entries::EntryDate).string().not_null())
        .col(ColumnDef::new(Entries::EnteredAmount).double().not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(entries_table(Ingressos::Table))
            .await?;
        manager
            .create_table(entries_table(Registros::Table))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registros::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ingressos::Table).to_owned())
            .await
    }
}
