//! Status dimensions shared by the entities, the HTTP models and the
//! lifecycle gate. Each enum is stored as its camelCase string value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum ProjectType {
    #[sea_orm(string_value = "brick")]
    Brick,
    #[sea_orm(string_value = "sponsor")]
    Sponsor,
    #[sea_orm(string_value = "partnerLed")]
    PartnerLed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum SubmissionStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "reviewing")]
    Reviewing,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    #[sea_orm(string_value = "notStarted")]
    NotStarted,
    #[sea_orm(string_value = "ongoing")]
    Ongoing,
    #[sea_orm(string_value = "paused")]
    Paused,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    #[sea_orm(string_value = "individual")]
    Individual,
    #[sea_orm(string_value = "corporate")]
    Corporate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum ReceiptStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "received")]
    Received,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "camelCase")]
pub enum TransactionSubmissionStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_match_wire_values() {
        assert_eq!(ProjectType::PartnerLed.to_value(), "partnerLed");
        assert_eq!(OperationStatus::NotStarted.to_value(), "notStarted");
        assert_eq!(
            serde_json::to_value(OperationStatus::NotStarted).unwrap(),
            serde_json::json!("notStarted")
        );
        assert_eq!(
            serde_json::to_value(ProjectType::PartnerLed).unwrap(),
            serde_json::json!("partnerLed")
        );
    }

    #[test]
    fn stored_values_parse_back() {
        assert_eq!(
            ReceiptStatus::try_from_value(&"received".to_string()).unwrap(),
            ReceiptStatus::Received
        );
        assert!(ApprovalStatus::try_from_value(&"approved ".to_string()).is_err());
    }
}
