//! Donation transaction rules: checkout validation and receipt updates.

use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use thiserror::Error;

use crate::entities::sea_orm_active_enums::{
    ReceiptStatus, TransactionSubmissionStatus, TransactionType,
};
use crate::lifecycle::{FieldErrors, ValidationError};
use crate::models::transaction::CreateTransactionRequest;

pub const MAX_DONOR_ID_LEN: usize = 128;
pub const MAX_COUNTRY_LEN: usize = 128;
pub const MAX_PAYMENT_MODE_LEN: usize = 64;
/// Largest amount a `NUMERIC(14, 2)` column can hold.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDonation {
    pub project_id: i64,
    pub donor_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub country_of_residence: String,
    pub payment_mode: String,
    pub submission_status: TransactionSubmissionStatus,
}

pub fn validate_new_donation(
    request: &CreateTransactionRequest,
) -> Result<ValidDonation, ValidationError> {
    let mut errors = FieldErrors::new();

    let project_id = match request.project_id {
        Some(id) if id > 0 => Some(id),
        Some(_) => {
            errors.insert("projectId", "Project id must be positive".to_string());
            None
        }
        None => {
            errors.insert("projectId", "Project is required".to_string());
            None
        }
    };

    let donor_id = request.donor_id.trim();
    if donor_id.is_empty() {
        errors.insert("donorId", "Donor is required".to_string());
    } else if donor_id.len() > MAX_DONOR_ID_LEN {
        errors.insert(
            "donorId",
            format!("Donor id exceeds {MAX_DONOR_ID_LEN} characters"),
        );
    }

    if request.transaction_type.is_none() {
        errors.insert("type", "Donation type is required".to_string());
    }

    match request.amount {
        None => {
            errors.insert("amount", "Amount is required".to_string());
        }
        Some(amount) if amount <= Decimal::ZERO => {
            errors.insert("amount", "Amount must be greater than zero".to_string());
        }
        Some(amount) if amount > MAX_AMOUNT => {
            errors.insert("amount", "Amount is too large".to_string());
        }
        Some(amount) if amount.scale() > 2 && amount.round_dp(2) != amount => {
            errors.insert(
                "amount",
                "Amount cannot have more than two decimal places".to_string(),
            );
        }
        Some(_) => {}
    }

    let country = request.country_of_residence.trim();
    if country.chars().count() > MAX_COUNTRY_LEN {
        errors.insert(
            "countryOfResidence",
            format!("Country exceeds {MAX_COUNTRY_LEN} characters"),
        );
    }
    let payment_mode = request.payment_mode.trim();
    if payment_mode.chars().count() > MAX_PAYMENT_MODE_LEN {
        errors.insert(
            "paymentMode",
            format!("Payment mode exceeds {MAX_PAYMENT_MODE_LEN} characters"),
        );
    }

    if !errors.is_empty() {
        return Err(ValidationError { fields: errors });
    }

    match (project_id, request.transaction_type, request.amount) {
        (Some(project_id), Some(transaction_type), Some(amount)) => Ok(ValidDonation {
            project_id,
            donor_id: donor_id.to_string(),
            transaction_type,
            amount: amount.round_dp(2),
            country_of_residence: country.to_string(),
            payment_mode: payment_mode.to_string(),
            submission_status: request
                .submission_status
                .unwrap_or(TransactionSubmissionStatus::Submitted),
        }),
        _ => Err(ValidationError::single("transaction", "Invalid transaction")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptChange {
    /// Requested status already in place.
    Unchanged,
    Updated {
        from: ReceiptStatus,
        to: ReceiptStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReceiptError {
    #[error(
        "receipt is already {}; it cannot be changed to {}",
        .current.to_value(),
        .requested.to_value()
    )]
    Final {
        current: ReceiptStatus,
        requested: ReceiptStatus,
    },
    #[error("receipt cannot be moved back to pending")]
    BackToPending,
}

/// Decides what a receipt-status request does to a transaction.
///
/// Repeating the current status is a successful no-op. Received and
/// cancelled are final.
pub fn plan_receipt_update(
    current: ReceiptStatus,
    requested: ReceiptStatus,
) -> Result<ReceiptChange, ReceiptError> {
    if current == requested {
        return Ok(ReceiptChange::Unchanged);
    }
    match (current, requested) {
        (ReceiptStatus::Pending, _) => Ok(ReceiptChange::Updated {
            from: current,
            to: requested,
        }),
        (_, ReceiptStatus::Pending) => Err(ReceiptError::BackToPending),
        _ => Err(ReceiptError::Final { current, requested }),
    }
}
