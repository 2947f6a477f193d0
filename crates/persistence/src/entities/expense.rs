//! Expense entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::expense::Expense;

/// Database row mapping for the expenses table.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseEntity {
    pub id: i64,
    pub expense_id: Uuid,
    pub organization_id: Uuid,
    pub category: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub incurred_on: NaiveDate,
    pub reptile_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpenseEntity> for Expense {
    fn from(entity: ExpenseEntity) -> Self {
        Self {
            id: entity.id,
            expense_id: entity.expense_id,
            organization_id: entity.organization_id,
            category: entity.category,
            description: entity.description,
            amount_cents: entity.amount_cents,
            currency: entity.currency,
            incurred_on: entity.incurred_on,
            reptile_id: entity.reptile_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
