//! Expense repository for database operations.

use chrono::NaiveDate;
use sqlx::prelude::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ExpenseEntity;
use crate::metrics::QueryTimer;

/// One category's total within a yearly summary.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryTotalRow {
    pub category: String,
    pub total_cents: i64,
}

/// Repository for expense database operations.
#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new expense.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        organization_id: Uuid,
        category: &str,
        description: Option<&str>,
        amount_cents: i64,
        currency: &str,
        incurred_on: NaiveDate,
        reptile_id: Option<Uuid>,
    ) -> Result<ExpenseEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_expense");
        let result = sqlx::query_as::<_, ExpenseEntity>(
            r#"
            INSERT INTO expenses (organization_id, category, description, amount_cents,
                                  currency, incurred_on, reptile_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(category)
        .bind(description)
        .bind(amount_cents)
        .bind(currency)
        .bind(incurred_on)
        .bind(reptile_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an expense by UUID within an organization.
    pub async fn find_by_expense_id(
        &self,
        organization_id: Uuid,
        expense_id: Uuid,
    ) -> Result<Option<ExpenseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_expense_by_id");
        let result = sqlx::query_as::<_, ExpenseEntity>(
            r#"
            SELECT * FROM expenses WHERE organization_id = $1 AND expense_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List expenses with optional filters, newest first.
    pub async fn list(
        &self,
        organization_id: Uuid,
        category: Option<&str>,
        reptile_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExpenseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_expenses");
        let result = sqlx::query_as::<_, ExpenseEntity>(
            r#"
            SELECT * FROM expenses
            WHERE organization_id = $1
              AND ($2::text IS NULL OR category = $2)
              AND ($3::uuid IS NULL OR reptile_id = $3)
              AND ($4::date IS NULL OR incurred_on >= $4)
              AND ($5::date IS NULL OR incurred_on <= $5)
            ORDER BY incurred_on DESC, id DESC
            "#,
        )
        .bind(organization_id)
        .bind(category)
        .bind(reptile_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an expense (partial update).
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        organization_id: Uuid,
        expense_id: Uuid,
        category: Option<&str>,
        description: Option<&str>,
        amount_cents: Option<i64>,
        currency: Option<&str>,
        incurred_on: Option<NaiveDate>,
        reptile_id: Option<Uuid>,
    ) -> Result<Option<ExpenseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_expense");
        let result = sqlx::query_as::<_, ExpenseEntity>(
            r#"
            UPDATE expenses SET
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                amount_cents = COALESCE($5, amount_cents),
                currency = COALESCE($6, currency),
                incurred_on = COALESCE($7, incurred_on),
                reptile_id = COALESCE($8, reptile_id),
                updated_at = NOW()
            WHERE organization_id = $1 AND expense_id = $2
            RETURNING *
            "#,
        )
        .bind(organization_id)
        .bind(expense_id)
        .bind(category)
        .bind(description)
        .bind(amount_cents)
        .bind(currency)
        .bind(incurred_on)
        .bind(reptile_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Per-category totals for one calendar year.
    pub async fn summary_by_year(
        &self,
        organization_id: Uuid,
        year: i32,
    ) -> Result<Vec<CategoryTotalRow>, sqlx::Error> {
        let timer = QueryTimer::new("expense_summary_by_year");
        let result = sqlx::query_as::<_, CategoryTotalRow>(
            r#"
            SELECT category, SUM(amount_cents)::bigint AS total_cents
            FROM expenses
            WHERE organization_id = $1
              AND EXTRACT(YEAR FROM incurred_on) = $2
            GROUP BY category
            ORDER BY total_cents DESC
            "#,
        )
        .bind(organization_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an expense. Returns the number of rows deleted (0 or 1).
    pub async fn delete(
        &self,
        organization_id: Uuid,
        expense_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expense");
        let result = sqlx::query(
            r#"
            DELETE FROM expenses WHERE organization_id = $1 AND expense_id = $2
            "#,
        )
        .bind(organization_id)
        .bind(expense_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
