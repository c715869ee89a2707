//! Resource kind descriptors
//!
//! A kind ties a record type to its routes. The edit endpoint and the HTTP
//! handlers are generic over it, so adding a record kind is one impl here.

use crate::models::{Expense, Invoice, Record};

pub trait ResourceKind: Send + Sync + 'static {
    type Record: Record;

    /// Path segment under `/dashboard` and `/api` ("expenses")
    const SEGMENT: &'static str;

    /// Capitalized singular name for page titles ("Expense")
    const DISPLAY_NAME: &'static str;

    /// Collection listing page, the default post-delete redirect target
    fn listing_path() -> String {
        format!("/dashboard/{}/", Self::SEGMENT)
    }

    /// Detail page of one record; the edit form posts back here
    fn record_path(id: &str) -> String {
        format!("{}{}", Self::listing_path(), id)
    }

    /// JSON document route of one record
    fn api_path(id: &str) -> String {
        format!("/api/{}/{}", Self::SEGMENT, id)
    }
}

/// Expense records under `/dashboard/expenses/`
#[derive(Debug, Clone, Copy, Default)]
pub struct Expenses;

impl ResourceKind for Expenses {
    type Record = Expense;
    const SEGMENT: &'static str = "expenses";
    const DISPLAY_NAME: &'static str = "Expense";
}

/// Income records (invoices) under `/dashboard/income/`
#[derive(Debug, Clone, Copy, Default)]
pub struct Income;

impl ResourceKind for Income {
    type Record = Invoice;
    const SEGMENT: &'static str = "income";
    const DISPLAY_NAME: &'static str = "Invoice";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_paths() {
        assert_eq!(Expenses::listing_path(), "/dashboard/expenses/");
        assert_eq!(Expenses::record_path("42"), "/dashboard/expenses/42");
        assert_eq!(Expenses::api_path("42"), "/api/expenses/42");
    }

    #[test]
    fn test_income_paths() {
        assert_eq!(Income::listing_path(), "/dashboard/income/");
        assert_eq!(Income::record_path("i7"), "/dashboard/income/i7");
        assert_eq!(Invoice::KIND, "invoice");
    }
}
