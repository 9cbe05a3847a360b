//! Donation transaction endpoints: checkout, listing and receipt updates.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::info;

use crate::donation::{ReceiptChange, plan_receipt_update, validate_new_donation};
use crate::entities::donation_transaction;
use crate::entities::sea_orm_active_enums::ReceiptStatus;
use crate::lifecycle::{StatusSet, accepts_donations};
use crate::models::transaction::{
    CreateTransactionRequest, ReceiptUpdateRequest, ReceiptUpdateResponse,
    TransactionListQuery, TransactionListResponse, TransactionView,
};
use crate::state::AppState;

use super::projects::{fetch_project, load_project};
use super::{HttpError, PageRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route(
            "/transactions/{transaction_id}/receipt",
            patch(update_receipt),
        )
        .route(
            "/projects/{project_id}/transactions",
            get(list_project_transactions),
        )
}

async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionView>), HttpError> {
    let donation = validate_new_donation(&request)?;

    let project = fetch_project(&state, donation.project_id).await?;
    accepts_donations(StatusSet::of(&project)).map_err(|reason| {
        HttpError::new(
            StatusCode::CONFLICT,
            format!("Project {} does not accept donations: {reason}", project.id),
        )
    })?;

    let now = Utc::now().fixed_offset();
    let model = donation_transaction::ActiveModel {
        id: NotSet,
        project_id: Set(donation.project_id),
        donor_id: Set(donation.donor_id),
        transaction_type: Set(donation.transaction_type),
        amount: Set(donation.amount),
        country_of_residence: Set(donation.country_of_residence),
        payment_mode: Set(donation.payment_mode),
        receipt_status: Set(ReceiptStatus::Pending),
        submission_status: Set(donation.submission_status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let transaction = model
        .insert(&state.database)
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    info!(
        "Donation {} of {} recorded for project {} by {}",
        transaction.id, transaction.amount, transaction.project_id, transaction.donor_id
    );

    Ok((StatusCode::CREATED, Json(TransactionView::from(transaction))))
}

async fn get_transaction(
    Path(transaction_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TransactionView>, HttpError> {
    let transaction = fetch_transaction(&state, transaction_id).await?;
    Ok(Json(TransactionView::from(transaction)))
}

async fn list_project_transactions(
    Path(project_id): Path<i64>,
    Query(query): Query<TransactionListQuery>,
    State(state): State<AppState>,
) -> Result<Json<TransactionListResponse>, HttpError> {
    let page = PageRequest::resolve(&state.pagination, query.page, query.limit)?;
    load_project(&state, project_id).await?;

    let mut select = donation_transaction::Entity::find()
        .filter(donation_transaction::Column::ProjectId.eq(project_id));
    if let Some(status) = query.receipt_status {
        select = select.filter(donation_transaction::Column::ReceiptStatus.eq(status));
    }

    let paginator = select
        .order_by_desc(donation_transaction::Column::CreatedAt)
        .order_by_desc(donation_transaction::Column::Id)
        .paginate(&state.database, page.limit);

    let counts = paginator
        .num_items_and_pages()
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    let transactions = paginator
        .fetch_page(page.index())
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    assert!(
        transactions.len() <= page.limit as usize,
        "Returned more transactions than requested",
    );

    Ok(Json(TransactionListResponse {
        transactions: transactions.into_iter().map(TransactionView::from).collect(),
        pagination: page.envelope(counts.number_of_items, counts.number_of_pages),
    }))
}

/// Finance staff confirm (or cancel) a pledge. Repeating the current status
/// succeeds without a write.
async fn update_receipt(
    Path(transaction_id): Path<i64>,
    State(state): State<AppState>,
    Json(request): Json<ReceiptUpdateRequest>,
) -> Result<Json<ReceiptUpdateResponse>, HttpError> {
    let transaction = fetch_transaction(&state, transaction_id).await?;

    let change = plan_receipt_update(transaction.receipt_status, request.receipt_status)
        .map_err(|err| HttpError::new(StatusCode::CONFLICT, err.to_string()))?;

    match change {
        ReceiptChange::Unchanged => Ok(Json(ReceiptUpdateResponse {
            transaction: TransactionView::from(transaction),
            changed: false,
        })),
        ReceiptChange::Updated { from, to } => {
            let mut model: donation_transaction::ActiveModel = transaction.into();
            model.receipt_status = Set(to);
            model.updated_at = Set(Utc::now().fixed_offset());

            let updated = model
                .update(&state.database)
                .await
                .map_err(|err| {
                    HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                })?;

            info!(
                "Donation {} receipt {} -> {} (project {})",
                updated.id,
                from.to_value(),
                to.to_value(),
                updated.project_id
            );

            Ok(Json(ReceiptUpdateResponse {
                transaction: TransactionView::from(updated),
                changed: true,
            }))
        }
    }
}

async fn fetch_transaction(
    state: &AppState,
    transaction_id: i64,
) -> Result<donation_transaction::Model, HttpError> {
    if transaction_id <= 0 {
        return Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            "transaction id must be positive".to_string(),
        ));
    }

    donation_transaction::Entity::find_by_id(transaction_id)
        .one(&state.database)
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
        .ok_or_else(|| {
            HttpError::new(
                StatusCode::NOT_FOUND,
                format!("Transaction {transaction_id} not found"),
            )
        })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use super::*;
    use crate::state::fixtures;

    #[tokio::test]
    async fn repeating_the_receipt_status_does_not_write() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fixtures::transaction(
                5,
                1,
                dec!(500),
                ReceiptStatus::Received,
            )]])
            .into_connection();
        let state = fixtures::state(database);

        let Json(response) = update_receipt(
            Path(5),
            State(state.clone()),
            Json(ReceiptUpdateRequest {
                receipt_status: ReceiptStatus::Received,
            }),
        )
        .await
        .unwrap();
        assert!(!response.changed);
        assert_eq!(response.transaction.receipt_status, ReceiptStatus::Received);
        assert_eq!(state.database.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn marking_received_updates_the_row() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fixtures::transaction(
                5,
                1,
                dec!(500),
                ReceiptStatus::Pending,
            )]])
            .append_query_results([vec![fixtures::transaction(
                5,
                1,
                dec!(500),
                ReceiptStatus::Received,
            )]])
            .into_connection();
        let state = fixtures::state(database);

        let Json(response) = update_receipt(
            Path(5),
            State(state.clone()),
            Json(ReceiptUpdateRequest {
                receipt_status: ReceiptStatus::Received,
            }),
        )
        .await
        .unwrap();
        assert!(response.changed);
        assert_eq!(response.transaction.receipt_status, ReceiptStatus::Received);

        let log = format!("{:?}", state.database.into_transaction_log());
        assert!(log.contains("UPDATE"), "{log}");
    }

    #[tokio::test]
    async fn cancelled_receipt_cannot_be_received() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fixtures::transaction(
                5,
                1,
                dec!(500),
                ReceiptStatus::Cancelled,
            )]])
            .into_connection();
        let state = fixtures::state(database);

        let err = update_receipt(
            Path(5),
            State(state),
            Json(ReceiptUpdateRequest {
                receipt_status: ReceiptStatus::Received,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn project_listing_reports_page_envelope() {
        let count = BTreeMap::from([("num_items", Value::from(3i64))]);
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fixtures::project(1, Some(dec!(50000)))]])
            .append_query_results([vec![count]])
            .append_query_results([vec![
                fixtures::transaction(9, 1, dec!(1000), ReceiptStatus::Received),
                fixtures::transaction(8, 1, dec!(500), ReceiptStatus::Received),
            ]])
            .into_connection();
        let state = fixtures::state(database);

        let Json(listing) = list_project_transactions(
            Path(1),
            Query(TransactionListQuery {
                page: Some(1),
                limit: Some(2),
                receipt_status: None,
            }),
            State(state),
        )
        .await
        .unwrap();
        assert_eq!(listing.transactions.len(), 2);
        assert_eq!(listing.pagination.total_count, 3);
        assert_eq!(listing.pagination.total_pages, 2);
        assert_eq!(listing.pagination.limit, 2);
    }
}
