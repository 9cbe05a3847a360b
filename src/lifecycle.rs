//! Donation project validation and status transitions.
//!
//! Every write to a project goes through [`review_new_project`] or
//! [`review_patch`]. Both merge the incoming values into a [`ProjectDraft`],
//! validate the merged draft, run the status gate, and collect every failure
//! into a single [`ValidationError`] keyed by the wire field name.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;
use thiserror::Error;

use crate::donation::MAX_AMOUNT;
use crate::entities::donation_project;
use crate::entities::sea_orm_active_enums::{
    ApprovalStatus, OperationStatus, ProjectType, SubmissionStatus,
};
use crate::models::project::{CreateProjectRequest, ProjectPatch};

pub const MAX_TITLE_LEN: usize = 256;
pub const MAX_LOCATION_LEN: usize = 256;
pub const MAX_MANAGED_BY_LEN: usize = 128;
pub const MAX_TEXT_LEN: usize = 20_000;

const BULLET_MARKERS: [char; 4] = ['•', '-', '*', '·'];

pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct ValidationError {
    pub fields: FieldErrors,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field, message.into());
        Self { fields }
    }

    fn check(fields: FieldErrors) -> Result<(), Self> {
        if fields.is_empty() {
            Ok(())
        } else {
            Err(Self { fields })
        }
    }
}

/// Editable project fields before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub location: String,
    pub about: String,
    pub objectives: String,
    pub beneficiaries: String,
    pub project_type: Option<ProjectType>,
    pub target_fund: Option<Decimal>,
    pub brick_size: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

impl From<&donation_project::Model> for ProjectDraft {
    fn from(project: &donation_project::Model) -> Self {
        Self {
            title: project.title.clone(),
            location: project.location.clone(),
            about: project.about.clone(),
            objectives: project.objectives.clone(),
            beneficiaries: project.beneficiaries.clone(),
            project_type: Some(project.project_type),
            target_fund: project.target_fund,
            brick_size: project.brick_size,
            start_date: Some(project.start_date),
            end_date: Some(project.end_date),
            deadline: Some(project.deadline),
        }
    }
}

impl ProjectDraft {
    fn apply(&mut self, patch: &ProjectPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(about) = &patch.about {
            self.about = about.clone();
        }
        if let Some(objectives) = &patch.objectives {
            self.objectives = objectives.clone();
        }
        if let Some(beneficiaries) = &patch.beneficiaries {
            self.beneficiaries = beneficiaries.clone();
        }
        if let Some(project_type) = patch.project_type {
            self.project_type = Some(project_type);
        }
        if let Some(target_fund) = patch.target_fund {
            self.target_fund = target_fund;
        }
        if let Some(brick_size) = patch.brick_size {
            self.brick_size = brick_size;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
    }
}

/// Fields that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub title: String,
    pub location: String,
    pub about: String,
    pub objectives: String,
    pub beneficiaries: String,
    pub project_type: ProjectType,
    pub target_fund: Option<Decimal>,
    pub brick_size: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSet {
    pub submission: SubmissionStatus,
    pub approval: ApprovalStatus,
    pub operation: OperationStatus,
}

impl StatusSet {
    pub const INITIAL: Self = Self {
        submission: SubmissionStatus::Draft,
        approval: ApprovalStatus::Pending,
        operation: OperationStatus::NotStarted,
    };

    pub fn of(project: &donation_project::Model) -> Self {
        Self {
            submission: project.submission_status,
            approval: project.approval_status,
            operation: project.operation_status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusChange {
    pub submission: Option<SubmissionStatus>,
    pub approval: Option<ApprovalStatus>,
    pub operation: Option<OperationStatus>,
}

impl From<&ProjectPatch> for StatusChange {
    fn from(patch: &ProjectPatch) -> Self {
        Self {
            submission: patch.submission_status,
            approval: patch.approval_status,
            operation: patch.operation_status,
        }
    }
}

/// Outcome of a successful review: what to write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub fields: ValidProject,
    pub statuses: StatusSet,
}

/// Validates a creation request. New projects start as draft / pending /
/// not started and may be submitted in the same request.
pub fn review_new_project(
    request: &CreateProjectRequest,
) -> Result<(ProjectUpdate, String), ValidationError> {
    let draft = ProjectDraft {
        title: request.title.clone(),
        location: request.location.clone(),
        about: request.about.clone(),
        objectives: request.objectives.clone(),
        beneficiaries: request.beneficiaries.clone(),
        project_type: request.project_type,
        target_fund: request.target_fund,
        brick_size: request.brick_size,
        start_date: request.start_date,
        end_date: request.end_date,
        deadline: request.deadline,
    };
    let change = StatusChange {
        submission: request.submission_status,
        ..StatusChange::default()
    };

    let mut errors = FieldErrors::new();
    let managed_by = request.managed_by.trim();
    if managed_by.is_empty() {
        errors.insert("managedBy", "Owner is required".to_string());
    } else if managed_by.len() > MAX_MANAGED_BY_LEN {
        errors.insert(
            "managedBy",
            format!("Owner id exceeds {MAX_MANAGED_BY_LEN} characters"),
        );
    }

    let fields = validate_draft(&draft, &mut errors);
    let statuses = apply_status_change(StatusSet::INITIAL, change, &mut errors);
    ValidationError::check(errors)?;

    let fields = fields.ok_or_else(|| ValidationError::single("project", "Invalid project"))?;
    Ok((ProjectUpdate { fields, statuses }, managed_by.to_string()))
}

/// Validates `patch` against the stored project.
pub fn review_patch(
    current: &donation_project::Model,
    patch: &ProjectPatch,
) -> Result<ProjectUpdate, ValidationError> {
    let mut draft = ProjectDraft::from(current);
    draft.apply(patch);

    let mut errors = FieldErrors::new();
    let fields = validate_draft(&draft, &mut errors);
    let statuses = apply_status_change(StatusSet::of(current), StatusChange::from(patch), &mut errors);
    ValidationError::check(errors)?;

    let fields = fields.ok_or_else(|| ValidationError::single("project", "Invalid project"))?;
    Ok(ProjectUpdate { fields, statuses })
}

/// Checks every field rule, recording failures in `errors`. Returns the
/// validated fields only when no field rule failed.
pub fn validate_draft(draft: &ProjectDraft, errors: &mut FieldErrors) -> Option<ValidProject> {
    let before = errors.len();

    let title = required_text(draft.title.as_str(), "title", "Title", MAX_TITLE_LEN, errors);
    let location = required_text(
        draft.location.as_str(),
        "location",
        "Location",
        MAX_LOCATION_LEN,
        errors,
    );
    let about = required_text(draft.about.as_str(), "about", "About", MAX_TEXT_LEN, errors);

    let bullets = objective_bullets(&draft.objectives);
    if bullets.is_empty() {
        errors.insert("objectives", "At least one objective is required".to_string());
    }
    let objectives = bullets.join("\n");
    if objectives.chars().count() > MAX_TEXT_LEN {
        errors.insert(
            "objectives",
            format!("Objectives exceed {MAX_TEXT_LEN} characters"),
        );
    }

    let beneficiaries = draft.beneficiaries.trim().to_string();
    if beneficiaries.chars().count() > MAX_TEXT_LEN {
        errors.insert(
            "beneficiaries",
            format!("Beneficiaries exceed {MAX_TEXT_LEN} characters"),
        );
    }

    if let Some(target) = draft.target_fund {
        if target <= Decimal::ZERO {
            errors.insert("targetFund", "Target fund must be greater than zero".to_string());
        } else if target > MAX_AMOUNT {
            errors.insert("targetFund", "Target fund is too large".to_string());
        }
    }
    if let Some(size) = draft.brick_size {
        if size <= Decimal::ZERO {
            errors.insert("brickSize", "Brick size must be greater than zero".to_string());
        } else if size > MAX_AMOUNT {
            errors.insert("brickSize", "Brick size is too large".to_string());
        }
    }

    match draft.project_type {
        None => {
            errors.insert("type", "Project type is required".to_string());
        }
        Some(ProjectType::PartnerLed) if draft.target_fund.is_none() => {
            errors.insert(
                "targetFund",
                "Target fund is required for partner-led projects".to_string(),
            );
        }
        Some(ProjectType::Brick) if draft.brick_size.is_none() => {
            errors.insert(
                "brickSize",
                "Brick size is required for brick projects".to_string(),
            );
        }
        Some(_) => {}
    }

    if draft.start_date.is_none() {
        errors.insert("startDate", "Start date is required".to_string());
    }
    if draft.end_date.is_none() {
        errors.insert("endDate", "End date is required".to_string());
    }
    if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
        if end < start {
            errors.insert("endDate", "End date must be after start date".to_string());
        }
    }
    let deadline = draft.deadline.or(draft.end_date);
    if let (Some(start), Some(deadline)) = (draft.start_date, deadline) {
        if deadline < start {
            errors.insert("deadline", "Deadline must be after start date".to_string());
        }
    }

    if errors.len() != before {
        return None;
    }

    Some(ValidProject {
        title: title?,
        location: location?,
        about: about?,
        objectives,
        beneficiaries,
        project_type: draft.project_type?,
        target_fund: draft.target_fund,
        brick_size: draft.brick_size,
        start_date: draft.start_date?,
        end_date: draft.end_date?,
        deadline: deadline?,
    })
}

/// Applies the requested status moves on top of `current`, recording any
/// illegal move under its field name.
pub fn apply_status_change(
    current: StatusSet,
    change: StatusChange,
    errors: &mut FieldErrors,
) -> StatusSet {
    let mut next = current;

    if let Some(requested) = change.submission {
        if current.submission == SubmissionStatus::Submitted
            && requested == SubmissionStatus::Submitted
        {
            // Re-submitting would reset review state; edits must omit the status.
            errors.insert(
                "submissionStatus",
                "Project has already been submitted".to_string(),
            );
        } else if requested != current.submission {
            if submission_allowed(current.submission, requested) {
                next.submission = requested;
                if requested == SubmissionStatus::Submitted
                    && current.approval != ApprovalStatus::Approved
                {
                    next.approval = ApprovalStatus::Pending;
                }
            } else {
                errors.insert(
                    "submissionStatus",
                    format!(
                        "Cannot change submission from {} to {}",
                        current.submission.to_value(),
                        requested.to_value()
                    ),
                );
            }
        }
    }

    if let Some(requested) = change.approval {
        if requested != next.approval {
            if next.submission != SubmissionStatus::Submitted {
                errors.insert(
                    "approvalStatus",
                    "Project must be submitted before it can be reviewed".to_string(),
                );
            } else if approval_allowed(next.approval, requested) {
                next.approval = requested;
            } else {
                errors.insert(
                    "approvalStatus",
                    format!(
                        "Cannot change approval from {} to {}",
                        next.approval.to_value(),
                        requested.to_value()
                    ),
                );
            }
        }
    }

    if let Some(requested) = change.operation {
        if requested != next.operation {
            if !operation_allowed(next.operation, requested) {
                errors.insert(
                    "operationStatus",
                    format!(
                        "Cannot change operation from {} to {}",
                        next.operation.to_value(),
                        requested.to_value()
                    ),
                );
            } else if requested == OperationStatus::Ongoing
                && next.approval != ApprovalStatus::Approved
            {
                errors.insert(
                    "operationStatus",
                    "Project must be approved before it can start".to_string(),
                );
            } else if requested == OperationStatus::Ongoing
                && next.submission != SubmissionStatus::Submitted
            {
                errors.insert(
                    "operationStatus",
                    "Project must be submitted before it can start".to_string(),
                );
            } else {
                next.operation = requested;
            }
        }
    }

    next
}

pub fn submission_allowed(from: SubmissionStatus, to: SubmissionStatus) -> bool {
    use SubmissionStatus::*;
    matches!(
        (from, to),
        (Draft, Submitted) | (Submitted, Withdrawn) | (Withdrawn, Submitted) | (Withdrawn, Draft)
    )
}

pub fn approval_allowed(from: ApprovalStatus, to: ApprovalStatus) -> bool {
    use ApprovalStatus::*;
    matches!(
        (from, to),
        (Pending, Reviewing | Approved | Rejected)
            | (Reviewing, Pending | Approved | Rejected)
            | (Rejected, Reviewing)
    )
}

pub fn operation_allowed(from: OperationStatus, to: OperationStatus) -> bool {
    use OperationStatus::*;
    matches!(
        (from, to),
        (NotStarted, Ongoing | Cancelled)
            | (Ongoing, Paused | Completed | Cancelled)
            | (Paused, Ongoing | Completed | Cancelled)
    )
}

/// Whether new donations may be recorded against a project.
pub fn accepts_donations(statuses: StatusSet) -> Result<(), &'static str> {
    if statuses.approval == ApprovalStatus::Rejected {
        return Err("Project has been rejected");
    }
    match statuses.operation {
        OperationStatus::Cancelled => Err("Project has been cancelled"),
        OperationStatus::Completed => Err("Project has been completed"),
        _ => Ok(()),
    }
}

/// Splits bullet-joined objective text into trimmed, non-empty lines.
pub fn objective_bullets(text: &str) -> Vec<&str> {
    text.split(['\n', '•'])
        .map(|line| line.trim().trim_start_matches(BULLET_MARKERS).trim())
        .filter(|line| !line.is_empty())
        .collect()
}

fn required_text(
    value: &str,
    field: &'static str,
    label: &str,
    max_len: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, format!("{label} is required"));
        return None;
    }
    if trimmed.chars().count() > max_len {
        errors.insert(field, format!("{label} exceeds {max_len} characters"));
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored(project_type: ProjectType, statuses: StatusSet) -> donation_project::Model {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().fixed_offset();
        donation_project::Model {
            id: 7,
            title: "Village well".to_string(),
            location: "Kisumu".to_string(),
            about: "Clean water for 300 households".to_string(),
            objectives: "Drill borehole\nInstall pump".to_string(),
            beneficiaries: "300 households".to_string(),
            project_type,
            target_fund: Some(dec!(50000)),
            brick_size: Some(dec!(25)),
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            deadline: date(2026, 12, 31),
            submission_status: statuses.submission,
            approval_status: statuses.approval,
            operation_status: statuses.operation,
            managed_by: "manager-1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request() -> CreateProjectRequest {
        CreateProjectRequest {
            title: "School roof".to_string(),
            location: "Gulu".to_string(),
            about: "Replace the roof before rains".to_string(),
            objectives: "• Buy sheets • Hire crew".to_string(),
            project_type: Some(ProjectType::Sponsor),
            start_date: Some(date(2026, 2, 1)),
            end_date: Some(date(2026, 5, 1)),
            managed_by: "manager-2".to_string(),
            ..CreateProjectRequest::default()
        }
    }

    const APPROVED_SUBMITTED: StatusSet = StatusSet {
        submission: SubmissionStatus::Submitted,
        approval: ApprovalStatus::Approved,
        operation: OperationStatus::NotStarted,
    };

    #[test]
    fn new_project_defaults_deadline_to_end_date() {
        let (update, owner) = review_new_project(&create_request()).expect("valid project");
        assert_eq!(owner, "manager-2");
        assert_eq!(update.fields.deadline, date(2026, 5, 1));
        assert_eq!(update.fields.objectives, "Buy sheets\nHire crew");
        assert_eq!(update.statuses, StatusSet::INITIAL);
    }

    #[test]
    fn end_before_start_is_keyed_to_end_date() {
        let request = CreateProjectRequest {
            start_date: Some(date(2026, 1, 1)),
            end_date: Some(date(2025, 12, 31)),
            ..create_request()
        };
        let err = review_new_project(&request).unwrap_err();
        assert_eq!(
            err.fields.get("endDate").map(String::as_str),
            Some("End date must be after start date")
        );
    }

    #[test]
    fn all_failures_are_reported_together() {
        let request = CreateProjectRequest {
            title: "  ".to_string(),
            about: String::new(),
            objectives: "•  \n - ".to_string(),
            project_type: None,
            managed_by: String::new(),
            ..create_request()
        };
        let err = review_new_project(&request).unwrap_err();
        for field in ["title", "about", "objectives", "type", "managedBy"] {
            assert!(err.fields.contains_key(field), "missing {field} error");
        }
        assert!(!err.fields.contains_key("location"));
    }

    #[test]
    fn brick_project_needs_positive_brick_size() {
        let current = stored(ProjectType::Sponsor, StatusSet::INITIAL);
        for size in [Some(dec!(0)), Some(dec!(-5)), None] {
            let patch = ProjectPatch {
                project_type: Some(ProjectType::Brick),
                brick_size: Some(size),
                ..ProjectPatch::default()
            };
            let err = review_patch(&current, &patch).unwrap_err();
            assert!(err.fields.contains_key("brickSize"), "size {size:?}");
        }
    }

    #[test]
    fn partner_led_project_needs_target_fund() {
        let current = stored(ProjectType::Sponsor, StatusSet::INITIAL);
        let patch = ProjectPatch {
            project_type: Some(ProjectType::PartnerLed),
            target_fund: Some(None),
            ..ProjectPatch::default()
        };
        let err = review_patch(&current, &patch).unwrap_err();
        assert_eq!(
            err.fields.get("targetFund").map(String::as_str),
            Some("Target fund is required for partner-led projects")
        );
    }

    #[test]
    fn field_edit_keeps_approval_of_submitted_project() {
        let current = stored(ProjectType::Brick, APPROVED_SUBMITTED);
        let patch = ProjectPatch {
            title: Some("Village well phase 2".to_string()),
            ..ProjectPatch::default()
        };
        let update = review_patch(&current, &patch).expect("field edit");
        assert_eq!(update.statuses, APPROVED_SUBMITTED);
        assert_eq!(update.fields.title, "Village well phase 2");
    }

    #[test]
    fn resubmitting_submitted_project_is_rejected() {
        let current = stored(ProjectType::Brick, APPROVED_SUBMITTED);
        let patch = ProjectPatch {
            submission_status: Some(SubmissionStatus::Submitted),
            ..ProjectPatch::default()
        };
        let err = review_patch(&current, &patch).unwrap_err();
        assert!(err.fields.contains_key("submissionStatus"));
    }

    #[test]
    fn submitting_resets_approval_unless_approved() {
        let mut errors = FieldErrors::new();
        let rejected = StatusSet {
            submission: SubmissionStatus::Withdrawn,
            approval: ApprovalStatus::Rejected,
            operation: OperationStatus::NotStarted,
        };
        let submit = StatusChange {
            submission: Some(SubmissionStatus::Submitted),
            ..StatusChange::default()
        };
        let next = apply_status_change(rejected, submit, &mut errors);
        assert_eq!(next.approval, ApprovalStatus::Pending);

        let approved = StatusSet {
            approval: ApprovalStatus::Approved,
            ..rejected
        };
        let next = apply_status_change(approved, submit, &mut errors);
        assert_eq!(next.approval, ApprovalStatus::Approved);
        assert_eq!(next.submission, SubmissionStatus::Submitted);
        assert!(errors.is_empty());
    }

    #[test]
    fn review_requires_submission() {
        let mut errors = FieldErrors::new();
        let change = StatusChange {
            approval: Some(ApprovalStatus::Approved),
            ..StatusChange::default()
        };
        let next = apply_status_change(StatusSet::INITIAL, change, &mut errors);
        assert_eq!(next.approval, ApprovalStatus::Pending);
        assert!(errors.contains_key("approvalStatus"));
    }

    #[test]
    fn submit_and_approve_in_one_patch() {
        let mut errors = FieldErrors::new();
        let change = StatusChange {
            submission: Some(SubmissionStatus::Submitted),
            approval: Some(ApprovalStatus::Approved),
            operation: Some(OperationStatus::Ongoing),
        };
        let next = apply_status_change(StatusSet::INITIAL, change, &mut errors);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(next.approval, ApprovalStatus::Approved);
        assert_eq!(next.operation, OperationStatus::Ongoing);
    }

    #[test]
    fn operation_cannot_start_before_approval() {
        let mut errors = FieldErrors::new();
        let change = StatusChange {
            operation: Some(OperationStatus::Ongoing),
            ..StatusChange::default()
        };
        apply_status_change(StatusSet::INITIAL, change, &mut errors);
        assert_eq!(
            errors.get("operationStatus").map(String::as_str),
            Some("Project must be approved before it can start")
        );
    }

    #[test]
    fn withdrawn_project_cannot_start_even_if_approved() {
        let mut errors = FieldErrors::new();
        let withdrawn = StatusSet {
            submission: SubmissionStatus::Withdrawn,
            ..APPROVED_SUBMITTED
        };
        let change = StatusChange {
            operation: Some(OperationStatus::Ongoing),
            ..StatusChange::default()
        };
        let next = apply_status_change(withdrawn, change, &mut errors);
        assert_eq!(next.operation, OperationStatus::NotStarted);
        assert_eq!(
            errors.get("operationStatus").map(String::as_str),
            Some("Project must be submitted before it can start")
        );

        errors.clear();
        let next = apply_status_change(APPROVED_SUBMITTED, change, &mut errors);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(next.operation, OperationStatus::Ongoing);
    }

    #[test]
    fn long_text_limits_count_characters() {
        let current = stored(ProjectType::Brick, APPROVED_SUBMITTED);
        let at_limit = ProjectPatch {
            beneficiaries: Some("é".repeat(MAX_TEXT_LEN)),
            objectives: Some("ü".repeat(MAX_TEXT_LEN)),
            ..ProjectPatch::default()
        };
        let update = review_patch(&current, &at_limit).expect("multibyte text at limit");
        assert_eq!(update.fields.beneficiaries.chars().count(), MAX_TEXT_LEN);

        let over = ProjectPatch {
            beneficiaries: Some("é".repeat(MAX_TEXT_LEN + 1)),
            ..ProjectPatch::default()
        };
        let err = review_patch(&current, &over).unwrap_err();
        assert!(err.fields.contains_key("beneficiaries"));
        assert!(!err.fields.contains_key("objectives"));
    }

    #[test]
    fn terminal_operation_states_stay_terminal() {
        use OperationStatus::*;
        for from in [Completed, Cancelled] {
            for to in [NotStarted, Ongoing, Paused, Completed, Cancelled] {
                assert!(!operation_allowed(from, to), "{from:?} -> {to:?}");
            }
        }
        assert!(operation_allowed(Paused, Ongoing));
        assert!(!operation_allowed(NotStarted, Paused));
    }

    #[test]
    fn closed_projects_refuse_donations() {
        assert!(accepts_donations(APPROVED_SUBMITTED).is_ok());
        let completed = StatusSet {
            operation: OperationStatus::Completed,
            ..APPROVED_SUBMITTED
        };
        assert!(accepts_donations(completed).is_err());
        let rejected = StatusSet {
            approval: ApprovalStatus::Rejected,
            ..APPROVED_SUBMITTED
        };
        assert!(accepts_donations(rejected).is_err());
    }

    #[test]
    fn objective_bullets_ignore_markers_and_blanks() {
        assert_eq!(
            objective_bullets("• Train teachers\n\n- Buy books\n* "),
            vec!["Train teachers", "Buy books"]
        );
        assert!(objective_bullets(" • \n").is_empty());
    }
}
