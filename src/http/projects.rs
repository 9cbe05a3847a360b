use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::info;

use crate::entities::sea_orm_active_enums::ReceiptStatus;
use crate::entities::{donation_project, donation_transaction};
use crate::funding::{FundingSummary, FundingTotals};
use crate::lifecycle::{ProjectUpdate, review_new_project, review_patch};
use crate::models::project::{
    CreateProjectRequest, FundingQuery, FundingView, ProjectListQuery, ProjectListResponse,
    ProjectPatch, ProjectView,
};
use crate::state::AppState;

use super::{HttpError, PageRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{project_id}",
            get(get_project).patch(update_project),
        )
        .route("/projects/{project_id}/funding", get(get_project_funding))
}

async fn list_projects(
    Query(query): Query<ProjectListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, HttpError> {
    let page = PageRequest::resolve(&state.pagination, query.page, query.limit)?;

    let mut select = donation_project::Entity::find();

    if let Some(project_type) = query.project_type {
        select = select.filter(donation_project::Column::ProjectType.eq(project_type));
    }
    if let Some(status) = query.submission_status {
        select = select.filter(donation_project::Column::SubmissionStatus.eq(status));
    }
    if let Some(status) = query.approval_status {
        select = select.filter(donation_project::Column::ApprovalStatus.eq(status));
    }
    if let Some(status) = query.operation_status {
        select = select.filter(donation_project::Column::OperationStatus.eq(status));
    }
    if let Some(owner) = query
        .managed_by
        .as_deref()
        .map(str::trim)
        .filter(|owner| !owner.is_empty())
    {
        select = select.filter(donation_project::Column::ManagedBy.eq(owner));
    }

    let paginator = select
        .order_by_desc(donation_project::Column::CreatedAt)
        .order_by_desc(donation_project::Column::Id)
        .paginate(&state.database, page.limit);

    let counts = paginator
        .num_items_and_pages()
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    let projects = paginator
        .fetch_page(page.index())
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    assert!(
        projects.len() <= page.limit as usize,
        "Returned more projects than requested",
    );

    let ids = projects.iter().map(|p| p.id).collect::<Vec<_>>();
    let totals = load_funding_totals(&state, &ids).await?;

    let views = projects
        .into_iter()
        .map(|project| {
            let project_totals = totals.get(&project.id).copied().unwrap_or_default();
            let funding = funding_view(&project, &project_totals, None);
            ProjectView::from_model(project, funding)
        })
        .collect::<Vec<_>>();

    Ok(Json(ProjectListResponse {
        projects: views,
        pagination: page.envelope(counts.number_of_items, counts.number_of_pages),
    }))
}

async fn get_project(
    Path(project_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProjectView>, HttpError> {
    let project = load_project(&state, project_id).await?;
    let totals = load_funding_totals(&state, &[project_id]).await?;
    let project_totals = totals.get(&project_id).copied().unwrap_or_default();
    let funding = funding_view(&project, &project_totals, None);

    Ok(Json(ProjectView::from_model((*project).clone(), funding)))
}

async fn get_project_funding(
    Path(project_id): Path<i64>,
    Query(query): Query<FundingQuery>,
    State(state): State<AppState>,
) -> Result<Json<FundingView>, HttpError> {
    let project = load_project(&state, project_id).await?;
    let totals = load_funding_totals(&state, &[project_id]).await?;
    let project_totals = totals.get(&project_id).copied().unwrap_or_default();

    Ok(Json(funding_view(
        &project,
        &project_totals,
        query.receipt_status,
    )))
}

async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectView>), HttpError> {
    let (update, managed_by) = review_new_project(&request)?;

    let now = Utc::now().fixed_offset();
    let mut model = donation_project::ActiveModel {
        id: NotSet,
        managed_by: Set(managed_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    write_update(&mut model, update);

    let project = model
        .insert(&state.database)
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    info!(
        "Donation project {} created by {} ({}, {})",
        project.id,
        project.managed_by,
        project.project_type.to_value(),
        project.submission_status.to_value()
    );

    let funding = funding_view(&project, &FundingTotals::default(), None);
    Ok((
        StatusCode::CREATED,
        Json(ProjectView::from_model(project, funding)),
    ))
}

async fn update_project(
    Path(project_id): Path<i64>,
    State(state): State<AppState>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<ProjectView>, HttpError> {
    // Writes are checked against the stored row, never the cache.
    let current = fetch_project(&state, project_id).await?;
    let update = review_patch(&current, &patch)?;

    let previous = (
        current.submission_status,
        current.approval_status,
        current.operation_status,
    );
    let mut model: donation_project::ActiveModel = current.into();
    write_update(&mut model, update);
    model.updated_at = Set(Utc::now().fixed_offset());

    let project = model
        .update(&state.database)
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    state.cache.invalidate_project(project_id).await;

    let next = (
        project.submission_status,
        project.approval_status,
        project.operation_status,
    );
    if next != previous {
        info!(
            "Donation project {} status {}/{}/{} -> {}/{}/{}",
            project_id,
            previous.0.to_value(),
            previous.1.to_value(),
            previous.2.to_value(),
            next.0.to_value(),
            next.1.to_value(),
            next.2.to_value()
        );
    } else {
        info!("Donation project {} fields updated", project_id);
    }

    let totals = load_funding_totals(&state, &[project_id]).await?;
    let project_totals = totals.get(&project_id).copied().unwrap_or_default();
    let funding = funding_view(&project, &project_totals, None);
    Ok(Json(ProjectView::from_model(project, funding)))
}

/// Reads a project through the shared cache.
pub(crate) async fn load_project(
    state: &AppState,
    project_id: i64,
) -> Result<Arc<donation_project::Model>, HttpError> {
    if let Some(cached) = state.cache.projects.get(&project_id).await {
        return Ok(cached);
    }

    let seen = state.cache.project_generation();
    let project = Arc::new(fetch_project(state, project_id).await?);
    state
        .cache
        .store_project(project_id, Arc::clone(&project), seen)
        .await;
    Ok(project)
}

/// Reads a project straight from the database.
pub(crate) async fn fetch_project(
    state: &AppState,
    project_id: i64,
) -> Result<donation_project::Model, HttpError> {
    if project_id <= 0 {
        return Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            "project id must be positive".to_string(),
        ));
    }

    donation_project::Entity::find_by_id(project_id)
        .one(&state.database)
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
        .ok_or_else(|| {
            HttpError::new(
                StatusCode::NOT_FOUND,
                format!("Project {project_id} not found"),
            )
        })
}

/// Sums transaction amounts per project and receipt status.
async fn load_funding_totals(
    state: &AppState,
    project_ids: &[i64],
) -> Result<HashMap<i64, FundingTotals>, HttpError> {
    let mut totals = HashMap::with_capacity(project_ids.len());
    if project_ids.is_empty() {
        return Ok(totals);
    }

    let rows = donation_transaction::Entity::find()
        .select_only()
        .column(donation_transaction::Column::ProjectId)
        .column(donation_transaction::Column::ReceiptStatus)
        .column_as(donation_transaction::Column::Amount.sum(), "total")
        .filter(donation_transaction::Column::ProjectId.is_in(project_ids.iter().copied()))
        .group_by(donation_transaction::Column::ProjectId)
        .group_by(donation_transaction::Column::ReceiptStatus)
        .into_tuple::<(i64, ReceiptStatus, Option<Decimal>)>()
        .all(&state.database)
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    for (project_id, status, sum) in rows {
        totals
            .entry(project_id)
            .or_insert_with(FundingTotals::default)
            .add(status, sum.unwrap_or(Decimal::ZERO));
    }

    Ok(totals)
}

fn funding_view(
    project: &donation_project::Model,
    totals: &FundingTotals,
    filter: Option<ReceiptStatus>,
) -> FundingView {
    let summary = FundingSummary::compute(totals, project.target_fund, filter);
    assert!(
        summary.progress >= Decimal::ZERO && summary.progress <= Decimal::ONE,
        "Funding progress out of range"
    );
    FundingView::new(project.id, summary)
}

fn write_update(model: &mut donation_project::ActiveModel, update: ProjectUpdate) {
    let ProjectUpdate { fields, statuses } = update;
    model.title = Set(fields.title);
    model.location = Set(fields.location);
    model.about = Set(fields.about);
    model.objectives = Set(fields.objectives);
    model.beneficiaries = Set(fields.beneficiaries);
    model.project_type = Set(fields.project_type);
    model.target_fund = Set(fields.target_fund);
    model.brick_size = Set(fields.brick_size);
    model.start_date = Set(fields.start_date);
    model.end_date = Set(fields.end_date);
    model.deadline = Set(fields.deadline);
    model.submission_status = Set(statuses.submission);
    model.approval_status = Set(statuses.approval);
    model.operation_status = Set(statuses.operation);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;
    use crate::state::fixtures;

    fn sum_row(project_id: i64, status: &str, total: Decimal) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("project_id", Value::from(project_id)),
            ("receipt_status", Value::from(status)),
            ("total", Value::from(total)),
        ])
    }

    #[tokio::test]
    async fn funding_totals_are_grouped_per_project_and_status() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sum_row(1, "received", dec!(1500)),
                sum_row(1, "pending", dec!(200)),
                sum_row(2, "cancelled", dec!(40)),
            ]])
            .into_connection();
        let state = fixtures::state(database);

        let totals = load_funding_totals(&state, &[1, 2, 3]).await.unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&1].received, dec!(1500));
        assert_eq!(totals[&1].pending, dec!(200));
        assert_eq!(totals[&2].cancelled, dec!(40));
        assert_eq!(totals[&2].received, Decimal::ZERO);

        let log = format!("{:?}", state.database.into_transaction_log());
        assert!(log.contains("SUM("), "{log}");
        assert!(log.contains("GROUP BY"), "{log}");
    }

    #[tokio::test]
    async fn empty_id_list_skips_the_query() {
        let database = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = fixtures::state(database);

        assert!(load_funding_totals(&state, &[]).await.unwrap().is_empty());
        assert!(state.database.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn funding_endpoint_counts_received_donations() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fixtures::project(1, Some(dec!(50000)))]])
            .append_query_results([vec![
                sum_row(1, "received", dec!(1500)),
                sum_row(1, "pending", dec!(700)),
            ]])
            .append_query_results([vec![sum_row(1, "received", dec!(1500))]])
            .into_connection();
        let state = fixtures::state(database);

        let Json(funding) = get_project_funding(
            Path(1),
            Query(FundingQuery::default()),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(funding.current_fund, dec!(1500));
        assert_eq!(funding.total_pledged, dec!(2200));
        assert_eq!(funding.progress_percent, Some(dec!(3)));

        // Second read serves the project from cache but sums again.
        let Json(funding) = get_project_funding(
            Path(1),
            Query(FundingQuery::default()),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(funding.total_pledged, dec!(1500));
        assert_eq!(state.database.into_transaction_log().len(), 3);
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<donation_project::Model>::new()])
            .into_connection();
        let state = fixtures::state(database);

        let err = get_project(Path(42), State(state)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
