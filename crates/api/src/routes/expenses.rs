//! Expense endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use persistence::repositories::ExpenseRepository;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use domain::models::expense::{
    CategoryTotal, CreateExpenseRequest, ExpenseResponse, ExpenseSummaryResponse,
    ListExpensesQuery, UpdateExpenseRequest,
};

/// Query parameters for the expense summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Calendar year; defaults to the current year.
    pub year: Option<i32>,
}

/// Create a new expense.
///
/// POST /api/v1/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    request.validate()?;

    let repo = ExpenseRepository::new(state.pool.clone());
    let entity = repo
        .create(
            auth.organization_id,
            &request.category,
            request.description.as_deref(),
            request.amount_cents,
            &request.currency,
            request.incurred_on,
            request.reptile_id,
        )
        .await?;

    let expense: domain::models::Expense = entity.into();
    let response: ExpenseResponse = expense.into();

    info!(
        expense_id = %response.expense_id,
        category = %response.category,
        amount_cents = response.amount_cents,
        "Expense created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// List expenses.
///
/// GET /api/v1/expenses?category=&reptileId=&from=&to=
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let repo = ExpenseRepository::new(state.pool.clone());
    let entities = repo
        .list(
            auth.organization_id,
            query.category.as_deref(),
            query.reptile_id,
            query.from,
            query.to,
        )
        .await?;

    let expenses = entities
        .into_iter()
        .map(|e| {
            let expense: domain::models::Expense = e.into();
            expense.into()
        })
        .collect();

    Ok(Json(expenses))
}

/// Per-category expense totals for one year.
///
/// GET /api/v1/expenses/summary?year=
pub async fn expense_summary(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ExpenseSummaryResponse>, ApiError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let repo = ExpenseRepository::new(state.pool.clone());
    let rows = repo.summary_by_year(auth.organization_id, year).await?;

    let total_cents = rows.iter().map(|r| r.total_cents).sum();
    let categories = rows
        .into_iter()
        .map(|r| CategoryTotal {
            category: r.category,
            total_cents: r.total_cents,
        })
        .collect();

    Ok(Json(ExpenseSummaryResponse {
        year,
        total_cents,
        categories,
    }))
}

/// Get a single expense.
///
/// GET /api/v1/expenses/:expense_id
pub async fn get_expense(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let repo = ExpenseRepository::new(state.pool.clone());
    let entity = repo
        .find_by_expense_id(auth.organization_id, expense_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Expense not found".to_string()))?;

    let expense: domain::models::Expense = entity.into();
    Ok(Json(expense.into()))
}

/// Update an expense (partial update).
///
/// PATCH /api/v1/expenses/:expense_id
pub async fn update_expense(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(expense_id): Path<Uuid>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    request.validate()?;

    let repo = ExpenseRepository::new(state.pool.clone());
    let entity = repo
        .update(
            auth.organization_id,
            expense_id,
            request.category.as_deref(),
            request.description.as_deref(),
            request.amount_cents,
            request.currency.as_deref(),
            request.incurred_on,
            request.reptile_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Expense not found".to_string()))?;

    let expense: domain::models::Expense = entity.into();
    Ok(Json(expense.into()))
}

/// Delete an expense.
///
/// DELETE /api/v1/expenses/:expense_id
pub async fn delete_expense(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ExpenseRepository::new(state.pool.clone());
    let rows_affected = repo.delete(auth.organization_id, expense_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Expense not found".to_string()));
    }

    info!(expense_id = %expense_id, "Expense deleted");
    Ok(StatusCode::NO_CONTENT)
}
