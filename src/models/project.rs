use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::donation_project;
use crate::entities::sea_orm_active_enums::{
    ApprovalStatus, OperationStatus, ProjectType, ReceiptStatus, SubmissionStatus,
};
use crate::funding::FundingSummary;
use crate::lifecycle::objective_bullets;

use super::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub about: String,
    pub objectives: Vec<String>,
    pub beneficiaries: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub target_fund: Option<Decimal>,
    pub brick_size: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub deadline: NaiveDate,
    pub submission_status: SubmissionStatus,
    pub approval_status: ApprovalStatus,
    pub operation_status: OperationStatus,
    pub managed_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub funding: FundingView,
}

impl ProjectView {
    pub fn from_model(project: donation_project::Model, funding: FundingView) -> Self {
        let objectives = objective_bullets(&project.objectives)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            id: project.id,
            title: project.title,
            location: project.location,
            about: project.about,
            objectives,
            beneficiaries: project.beneficiaries,
            project_type: project.project_type,
            target_fund: project.target_fund,
            brick_size: project.brick_size,
            start_date: project.start_date,
            end_date: project.end_date,
            deadline: project.deadline,
            submission_status: project.submission_status,
            approval_status: project.approval_status,
            operation_status: project.operation_status,
            managed_by: project.managed_by,
            created_at: project.created_at.with_timezone(&Utc),
            updated_at: project.updated_at.with_timezone(&Utc),
            funding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingView {
    pub project_id: i64,
    pub current_fund: Decimal,
    pub total_pledged: Decimal,
    pub target_fund: Option<Decimal>,
    pub progress: Decimal,
    pub progress_percent: Option<Decimal>,
}

impl FundingView {
    pub fn new(project_id: i64, summary: FundingSummary) -> Self {
        Self {
            project_id,
            current_fund: summary.current_fund,
            total_pledged: summary.total_pledged,
            target_fund: summary.target_fund,
            progress: summary.progress,
            progress_percent: summary.progress_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectView>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub submission_status: Option<SubmissionStatus>,
    pub approval_status: Option<ApprovalStatus>,
    pub operation_status: Option<OperationStatus>,
    pub managed_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingQuery {
    pub receipt_status: Option<ReceiptStatus>,
}

/// Body of `POST /projects`.
///
/// Text fields default to empty so that a missing value is reported through
/// the field error map rather than as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectRequest {
    pub title: String,
    pub location: String,
    pub about: String,
    pub objectives: String,
    pub beneficiaries: String,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub target_fund: Option<Decimal>,
    pub brick_size: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub submission_status: Option<SubmissionStatus>,
    pub managed_by: String,
}

/// Body of `PATCH /projects/{id}`. Absent keys leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub objectives: Option<String>,
    pub beneficiaries: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    #[serde(deserialize_with = "super::double_option")]
    pub target_fund: Option<Option<Decimal>>,
    #[serde(deserialize_with = "super::double_option")]
    pub brick_size: Option<Option<Decimal>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "super::double_option")]
    pub deadline: Option<Option<NaiveDate>>,
    pub submission_status: Option<SubmissionStatus>,
    pub approval_status: Option<ApprovalStatus>,
    pub operation_status: Option<OperationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: ProjectPatch =
            serde_json::from_str(r#"{"targetFund": null, "title": "Wells"}"#).unwrap();
        assert_eq!(patch.target_fund, Some(None));
        assert_eq!(patch.brick_size, None);
        assert_eq!(patch.title.as_deref(), Some("Wells"));

        let patch: ProjectPatch = serde_json::from_str(r#"{"brickSize": "25.50"}"#).unwrap();
        assert_eq!(patch.brick_size, Some(Some(dec!(25.50))));
    }

    #[test]
    fn create_request_reads_wire_names() {
        let request: CreateProjectRequest = serde_json::from_str(
            r#"{
                "title": "School roof",
                "type": "partnerLed",
                "targetFund": 50000,
                "startDate": "2026-01-01",
                "endDate": "2026-06-30",
                "managedBy": "partner-7"
            }"#,
        )
        .unwrap();
        assert_eq!(request.project_type, Some(ProjectType::PartnerLed));
        assert_eq!(request.target_fund, Some(dec!(50000)));
        assert_eq!(request.deadline, None);
        assert!(request.about.is_empty());
    }
}
