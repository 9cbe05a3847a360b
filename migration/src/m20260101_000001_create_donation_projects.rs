use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Expr;

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
                        .table(DonationProjects::Table)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(DonationProjects::Table).to_owned())
            .await
    }
}

fn table() -> TableCreateStatement {
    Table::create()
        .table(DonationProjects::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(DonationProjects::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(DonationProjects::Title)
                .string_len(256)
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationProjects::Location)
                .string_len(256)
                .not_null(),
        )
        .col(ColumnDef::new(DonationProjects::About).text().not_null())
        .col(
            ColumnDef::new(DonationProjects::Objectives)
                .text()
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationProjects::Beneficiaries)
                .text()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(DonationProjects::ProjectType)
                .string_len(32)
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationProjects::TargetFund)
                .decimal_len(14, 2)
                .null(),
        )
        .col(
            ColumnDef::new(DonationProjects::BrickSize)
                .decimal_len(14, 2)
                .null(),
        )
        .col(ColumnDef::new(DonationProjects::StartDate).date().not_null())
        .col(ColumnDef::new(DonationProjects::EndDate).date().not_null())
        .col(ColumnDef::new(DonationProjects::Deadline).date().not_null())
        .col(
            ColumnDef::new(DonationProjects::SubmissionStatus)
                .string_len(32)
                .not_null()
                .default("draft"),
        )
        .col(
            ColumnDef::new(DonationProjects::ApprovalStatus)
                .string_len(32)
                .not_null()
                .default("pending"),
        )
        .col(
            ColumnDef::new(DonationProjects::OperationStatus)
                .string_len(32)
                .not_null()
                .default("notStarted"),
        )
        .col(
            ColumnDef::new(DonationProjects::ManagedBy)
                .string_len(128)
                .not_null(),
        )
        .col(
            ColumnDef::new(DonationProjects::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(DonationProjects::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

const INDEX_NAMES: [&str; 2] = [
    "idx_donation_projects_managed_by",
    "idx_donation_projects_status",
];

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        // Dashboard listing by owner
        Index::create()
            .name(INDEX_NAMES[0])
            .table(DonationProjects::Table)
            .if_not_exists()
            .col(DonationProjects::ManagedBy)
            .col(DonationProjects::CreatedAt)
            .to_owned(),
        Index::create()
            .name(INDEX_NAMES[1])
            .table(DonationProjects::Table)
            .if_not_exists()
            .col(DonationProjects::ApprovalStatus)
            .col(DonationProjects::OperationStatus)
            .to_owned(),
    ]
}

#[derive(DeriveIden)]
pub(crate) enum DonationProjects {
    Table,
    Id,
    Title,
    Location,
    About,
    Objectives,
    Beneficiaries,
    ProjectType,
    TargetFund,
    BrickSize,
    StartDate,
    EndDate,
    Deadline,
    SubmissionStatus,
    ApprovalStatus,
    OperationStatus,
    ManagedBy,
    CreatedAt,
    UpdatedAt,
}
