//! Individual pledges and payments made against a donation project.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ReceiptStatus, TransactionSubmissionStatus, TransactionType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donation_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    /// Partner or user id of the donor
    pub donor_id: String,
    pub transaction_type: TransactionType,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub amount: Decimal,
    pub country_of_residence: String,
    pub payment_mode: String,
    /// Confirmed by finance staff once the payment lands
    pub receipt_status: ReceiptStatus,
    pub submission_status: TransactionSubmissionStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donation_project::Entity",
        from = "Column::ProjectId",
        to = "super::donation_project::Column::Id"
    )]
    DonationProject,
}

impl Related<super::donation_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonationProject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
