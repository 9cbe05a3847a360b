use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::donation_transaction;
use crate::entities::sea_orm_active_enums::{
    ReceiptStatus, TransactionSubmissionStatus, TransactionType,
};

use super::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: i64,
    pub project_id: i64,
    pub donor_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub country_of_residence: String,
    pub payment_mode: String,
    pub receipt_status: ReceiptStatus,
    pub submission_status: TransactionSubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<donation_transaction::Model> for TransactionView {
    fn from(tx: donation_transaction::Model) -> Self {
        Self {
            id: tx.id,
            project_id: tx.project_id,
            donor_id: tx.donor_id,
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            country_of_residence: tx.country_of_residence,
            payment_mode: tx.payment_mode,
            receipt_status: tx.receipt_status,
            submission_status: tx.submission_status,
            created_at: tx.created_at.with_timezone(&Utc),
            updated_at: tx.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionView>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub receipt_status: Option<ReceiptStatus>,
}

/// Body of `POST /transactions`, sent by the donor checkout flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTransactionRequest {
    pub project_id: Option<i64>,
    pub donor_id: String,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub country_of_residence: String,
    pub payment_mode: String,
    pub submission_status: Option<TransactionSubmissionStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptUpdateRequest {
    pub receipt_status: ReceiptStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptUpdateResponse {
    pub transaction: TransactionView,
    /// False when the requested status was already in place.
    pub changed: bool,
}
