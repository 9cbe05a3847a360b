use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ApprovalStatus, OperationStatus, ProjectType, SubmissionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donation_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub about: String,
    /// Bullet-joined objective lines
    #[sea_orm(column_type = "Text")]
    pub objectives: String,
    #[sea_orm(column_type = "Text")]
    pub beneficiaries: String,
    pub project_type: ProjectType,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub target_fund: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub brick_size: Option<Decimal>,
    pub start_date: Date,
    pub end_date: Date,
    pub deadline: Date,
    pub submission_status: SubmissionStatus,
    pub approval_status: ApprovalStatus,
    pub operation_status: OperationStatus,
    /// Owning manager or partner user id
    pub managed_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donation_transaction::Entity")]
    DonationTransaction,
}

impl Related<super::donation_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonationTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
