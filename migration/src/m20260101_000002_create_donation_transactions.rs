use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Expr;

use crate::m20260101_000001_create_donation_projects::DonationProjects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table()).await?;

        for index in indexes() {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in INDEX_NAMES {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(DonationTransactions::Table)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(DonationTransactions::Table).to_owned())
            .await
    }
}

fn table() -> TableCreateStatement {
    Table::create()
        .table(DonationTransactions::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(DonationTransactions::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(DonationTransactions::ProjectId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationTransactions::DonorId)
                .string_len(128)
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationTransactions::TransactionType)
                .string_len(32)
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationTransactions::Amount)
                .decimal_len(14, 2)
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationTransactions::CountryOfResidence)
                .string_len(128)
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(DonationTransactions::PaymentMode)
                .string_len(64)
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(DonationTransactions::ReceiptStatus)
                .string_len(32)
                .not_null()
                .default("pending"),
        )
        .col(
            ColumnDef::new(DonationTransactions::SubmissionStatus)
                .string_len(32)
                .not_null()
                .default("submitted"),
        )
        .col(
            ColumnDef::new(DonationTransactions::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(DonationTransactions::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_donation_transactions_project")
                .from(DonationTransactions::Table, DonationTransactions::ProjectId)
                .to(DonationProjects::Table, DonationProjects::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

const INDEX_NAMES: [&str; 2] = [
    "idx_donation_transactions_project_receipt",
    "idx_donation_transactions_donor",
];

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        // Funding aggregation sums per project and receipt status
        Index::create()
            .name(INDEX_NAMES[0])
            .table(DonationTransactions::Table)
            .if_not_exists()
            .col(DonationTransactions::ProjectId)
            .col(DonationTransactions::ReceiptStatus)
            .to_owned(),
        Index::create()
            .name(INDEX_NAMES[1])
            .table(DonationTransactions::Table)
            .if_not_exists()
            .col(DonationTransactions::DonorId)
            .to_owned(),
    ]
}

#[derive(DeriveIden)]
enum DonationTransactions {
    Table,
    Id,
    ProjectId,
    DonorId,
    TransactionType,
    Amount,
    CountryOfResidence,
    PaymentMode,
    ReceiptStatus,
    SubmissionStatus,
    CreatedAt,
    UpdatedAt,
}
