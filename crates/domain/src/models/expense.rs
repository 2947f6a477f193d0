//! Expense tracking domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A husbandry expense, optionally tied to a reptile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
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

fn default_currency() -> String {
    "USD".to_string()
}

/// Request payload for creating an expense.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount_cents: i64,

    #[serde(default = "default_currency")]
    #[validate(custom(function = "shared::validation::validate_currency"))]
    pub currency: String,

    pub incurred_on: NaiveDate,

    pub reptile_id: Option<Uuid>,
}

/// Request payload for updating an expense (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount_cents: Option<i64>,

    #[validate(custom(function = "shared::validation::validate_currency"))]
    pub currency: Option<String>,

    pub incurred_on: Option<NaiveDate>,

    pub reptile_id: Option<Uuid>,
}

/// Response payload for expense operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub expense_id: Uuid,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount_cents: i64,
    pub currency: String,
    pub incurred_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reptile_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            expense_id: e.expense_id,
            category: e.category,
            description: e.description,
            amount_cents: e.amount_cents,
            currency: e.currency,
            incurred_on: e.incurred_on,
            reptile_id: e.reptile_id,
            created_at: e.created_at,
        }
    }
}

/// Query parameters for listing expenses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpensesQuery {
    pub category: Option<String>,
    pub reptile_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Per-category expense totals for one year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryResponse {
    pub year: i32,
    pub total_cents: i64,
    pub categories: Vec<CategoryTotal>,
}

/// One category's total within a summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_expense_defaults_currency() {
        let json = r#"{
            "category": "feeders",
            "amountCents": 4500,
            "incurredOn": "2024-05-01"
        }"#;

        let request: CreateExpenseRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.currency, "USD");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_expense_rejects_zero_amount() {
        let request = CreateExpenseRequest {
            category: "vet".to_string(),
            description: None,
            amount_cents: 0,
            currency: "USD".to_string(),
            incurred_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            reptile_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_expense_rejects_bad_currency() {
        let request = CreateExpenseRequest {
            category: "supplies".to_string(),
            description: None,
            amount_cents: 1200,
            currency: "dollars".to_string(),
            incurred_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            reptile_id: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_expense_response_serialization() {
        let response = ExpenseResponse {
            expense_id: Uuid::new_v4(),
            category: "substrate".to_string(),
            description: None,
            amount_cents: 2999,
            currency: "EUR".to_string(),
            incurred_on: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            reptile_id: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"amountCents\":2999"));
        assert!(!json.contains("\"description\""));
        assert!(!json.contains("\"reptileId\""));
    }
}
