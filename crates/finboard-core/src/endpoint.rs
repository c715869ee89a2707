//! Generic record edit endpoint
//!
//! One `RecordEndpoint<K>` serves every request against a single record of
//! kind `K`:
//! - read: look the record up by id
//! - action: dispatch a form submission on its `intent` field to
//!   update or delete
//!
//! Every call runs to completion against the injected store. Nothing is
//! cached, retried or run in the background.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::form::{FormFields, Intent};
use crate::kind::ResourceKind;
use crate::models::{Record, RecordChanges};
use crate::store::StoreRef;

/// Acknowledgement returned by a successful update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    pub success: bool,
}

/// Result of a dispatched write request
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Updated(UpdateAck),
    Deleted { redirect_to: String },
}

pub struct RecordEndpoint<K: ResourceKind> {
    store: StoreRef<K::Record>,
    logger: Arc<dyn ErrorLogger>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Clone for RecordEndpoint<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            logger: Arc::clone(&self.logger),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> RecordEndpoint<K> {
    /// Create an endpoint over the given store
    pub fn new(store: StoreRef<K::Record>) -> Self {
        Self {
            store,
            logger: Arc::new(DefaultErrorLogger),
            _kind: PhantomData,
        }
    }

    /// Replace the logger used for failures and completed mutations
    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Read one record. An absent id is a routing bug, not a user error.
    pub async fn read(&self, id: Option<&str>) -> CoreResult<K::Record> {
        let result = self.find(id).await;
        if let Err(ref error) = result {
            self.logger.log_error(error, &self.context("read", id));
        }
        result
    }

    async fn find(&self, id: Option<&str>) -> CoreResult<K::Record> {
        let id = require_id(id)?;
        self.store
            .find_unique(id)
            .await?
            .ok_or_else(|| CoreError::not_found(K::Record::KIND, id))
    }

    /// Handle a write request. The id is checked first, then the intent;
    /// field decoding only happens once the intent is known.
    pub async fn action(
        &self,
        id: Option<&str>,
        fields: &FormFields,
        origin: Option<&str>,
    ) -> CoreResult<ActionOutcome> {
        let id = match require_id(id) {
            Ok(id) => id,
            Err(error) => {
                self.logger.log_error(&error, &self.context("action", None));
                return Err(error);
            }
        };

        match Intent::from_form(fields) {
            Ok(Intent::Update) => self.update(id, fields).await.map(ActionOutcome::Updated),
            Ok(Intent::Delete) => self
                .delete(id, origin)
                .await
                .map(|redirect_to| ActionOutcome::Deleted { redirect_to }),
            Err(error) => {
                self.logger.log_error(&error, &self.context("action", Some(id)));
                Err(error)
            }
        }
    }

    /// Overwrite title, description and amount. Nothing is written unless
    /// every field decodes.
    pub async fn update(&self, id: &str, fields: &FormFields) -> CoreResult<UpdateAck> {
        let context = self.context("update", Some(id));
        let result = match RecordChanges::from_form(fields) {
            Ok(changes) => self.store.update(id, &changes).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(record) => {
                self.logger.log_success(
                    &format!("Updated {} '{}' (amount {})", K::Record::KIND, record.id(), record.amount()),
                    &context,
                );
                Ok(UpdateAck { success: true })
            }
            Err(error) => {
                self.logger.log_error(&error, &context);
                Err(error)
            }
        }
    }

    /// Delete the record and return where to send the user next
    pub async fn delete(&self, id: &str, origin: Option<&str>) -> CoreResult<String> {
        let context = self.context("delete", Some(id));
        match self.store.delete(id).await {
            Ok(_) => {
                let target = redirect_after_delete(origin, id, &K::listing_path());
                self.logger.log_success(
                    &format!("Deleted {} '{}', redirecting to {}", K::Record::KIND, id, target),
                    &context,
                );
                Ok(target)
            }
            Err(error) => {
                self.logger.log_error(&error, &context);
                Err(error)
            }
        }
    }

    fn context(&self, operation: &str, id: Option<&str>) -> ErrorContext {
        ErrorContext::new(format!("{}.{}", K::Record::KIND, operation)).with_id(id)
    }
}

/// Empty ids count as absent
fn require_id(id: Option<&str>) -> CoreResult<&str> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CoreError::MissingIdentifier),
    }
}

/// Pick the post-delete redirect target.
///
/// Go back to `origin` unless it is missing or mentions the deleted id, in
/// which case go to the listing page. The check is a plain substring match,
/// so an origin that merely contains the id somewhere else (`/expenses/142`
/// after deleting `42`) also lands on the listing page.
pub fn redirect_after_delete(origin: Option<&str>, id: &str, listing_path: &str) -> String {
    let target = origin.filter(|o| !o.is_empty()).unwrap_or(listing_path);
    if target.contains(id) {
        listing_path.to_string()
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Expenses, Income};
    use crate::models::{Expense, Invoice};
    use crate::store::{MemoryStore, RecordStore};
    use std::sync::Mutex;

    /// Captures log calls so tests can assert on them
    #[derive(Default)]
    struct RecordingLogger {
        errors: Mutex<Vec<(String, String)>>,
        successes: Mutex<Vec<String>>,
    }

    impl ErrorLogger for RecordingLogger {
        fn log_error(&self, error: &CoreError, context: &ErrorContext) {
            self.errors
                .lock()
                .unwrap()
                .push((error.code().to_string(), context.operation.clone()));
        }

        fn log_success(&self, _message: &str, context: &ErrorContext) {
            self.successes.lock().unwrap().push(context.operation.clone());
        }
    }

    fn coffee() -> Expense {
        Expense {
            id: "e1".to_string(),
            title: "Coffee".to_string(),
            description: String::new(),
            amount: 4.5,
        }
    }

    fn expense_endpoint() -> (RecordEndpoint<Expenses>, Arc<MemoryStore<Expense>>) {
        let store = Arc::new(MemoryStore::with_records([coffee()]));
        (RecordEndpoint::new(store.clone()), store)
    }

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_read_existing_record() {
        let (endpoint, _) = expense_endpoint();
        let record = endpoint.read(Some("e1")).await.unwrap();
        assert_eq!(record.id(), "e1");
        assert_eq!(record, coffee());
    }

    #[tokio::test]
    async fn test_read_missing_record() {
        let (endpoint, _) = expense_endpoint();
        let error = endpoint.read(Some("e2")).await.unwrap_err();
        assert!(matches!(error, CoreError::RecordNotFound { ref id, .. } if id == "e2"));
    }

    #[tokio::test]
    async fn test_read_without_id_is_precondition_violation() {
        let (endpoint, _) = expense_endpoint();
        assert!(matches!(endpoint.read(None).await, Err(CoreError::MissingIdentifier)));
        assert!(matches!(endpoint.read(Some("")).await, Err(CoreError::MissingIdentifier)));
    }

    #[tokio::test]
    async fn test_update_then_read_returns_numeric_amount() {
        let (endpoint, _) = expense_endpoint();
        let fields = form(&[
            ("intent", "update"),
            ("title", "Coffee"),
            ("description", "Morning"),
            ("amount", "4.5"),
        ]);

        let outcome = endpoint.action(Some("e1"), &fields, None).await.unwrap();
        assert_eq!(outcome, ActionOutcome::Updated(UpdateAck { success: true }));

        let record = endpoint.read(Some("e1")).await.unwrap();
        assert_eq!(record.title, "Coffee");
        assert_eq!(record.description, "Morning");
        assert_eq!(record.amount, 4.5);
        assert_eq!(serde_json::to_value(&record).unwrap()["amount"], serde_json::json!(4.5));
    }

    #[tokio::test]
    async fn test_repeated_update_is_idempotent() {
        let (endpoint, _) = expense_endpoint();
        let fields = form(&[("title", "Lunch"), ("description", ""), ("amount", "12.30")]);

        endpoint.update("e1", &fields).await.unwrap();
        let first = endpoint.read(Some("e1")).await.unwrap();
        endpoint.update("e1", &fields).await.unwrap();
        let second = endpoint.read(Some("e1")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.amount, 12.3);
    }

    #[tokio::test]
    async fn test_bad_input_performs_no_mutation() {
        let (endpoint, store) = expense_endpoint();
        let bad_payloads = [
            form(&[("title", "Coffee"), ("description", "x"), ("amount", "abc")]),
            form(&[("title", "Coffee"), ("description", "x")]),
            form(&[("description", "x"), ("amount", "1")]),
            form(&[("title", "Coffee"), ("amount", "1")]),
        ];

        for fields in &bad_payloads {
            let error = endpoint.update("e1", fields).await.unwrap_err();
            assert!(matches!(error, CoreError::BadInput { .. }), "{:?}", error);
        }
        assert_eq!(store.find_unique("e1").await.unwrap(), Some(coffee()));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let (endpoint, _) = expense_endpoint();
        let fields = form(&[("title", "x"), ("description", ""), ("amount", "1")]);
        assert!(matches!(
            endpoint.update("ghost", &fields).await,
            Err(CoreError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_intent_is_bad_request() {
        let (endpoint, store) = expense_endpoint();
        let fields = form(&[
            ("intent", "archive"),
            ("title", "Coffee"),
            ("description", "x"),
            ("amount", "1"),
        ]);
        assert!(matches!(
            endpoint.action(Some("e1"), &fields, None).await,
            Err(CoreError::BadRequest { .. })
        ));

        // Missing intent, even with garbage fields, is still a bad request
        let fields = form(&[("amount", "abc")]);
        assert!(matches!(
            endpoint.action(Some("e1"), &fields, None).await,
            Err(CoreError::BadRequest { .. })
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_action_without_id() {
        let (endpoint, _) = expense_endpoint();
        let fields = form(&[("intent", "archive")]);
        assert!(matches!(
            endpoint.action(None, &fields, None).await,
            Err(CoreError::MissingIdentifier)
        ));
    }

    #[tokio::test]
    async fn test_delete_from_detail_page_goes_to_listing() {
        let (endpoint, store) = expense_endpoint();
        let fields = form(&[("intent", "delete")]);

        let outcome = endpoint
            .action(Some("e1"), &fields, Some("http://localhost:8081/dashboard/expenses/e1"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Deleted { redirect_to: "/dashboard/expenses/".to_string() }
        );
        assert!(store.is_empty().await);

        // Gone for good
        assert!(matches!(endpoint.read(Some("e1")).await, Err(CoreError::RecordNotFound { .. })));
        assert!(matches!(
            endpoint.delete("e1", None).await,
            Err(CoreError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_returns_to_unrelated_origin() {
        let store = Arc::new(MemoryStore::with_records([Invoice {
            id: "i9".to_string(),
            title: "Refund".to_string(),
            description: None,
            amount: 20.0,
        }]));
        let endpoint: RecordEndpoint<Income> = RecordEndpoint::new(store);

        let target = endpoint.delete("i9", Some("/dashboard")).await.unwrap();
        assert_eq!(target, "/dashboard");
    }

    #[tokio::test]
    async fn test_failures_and_mutations_are_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let (endpoint, _) = expense_endpoint();
        let endpoint = endpoint.with_logger(logger.clone());

        let _ = endpoint.read(Some("ghost")).await;
        let _ = endpoint.action(Some("e1"), &form(&[("intent", "nope")]), None).await;
        let _ = endpoint.delete("e1", None).await;

        let errors = logger.errors.lock().unwrap().clone();
        assert_eq!(
            errors,
            vec![
                ("RECORD_NOT_FOUND".to_string(), "expense.read".to_string()),
                ("BAD_REQUEST".to_string(), "expense.action".to_string()),
            ]
        );
        assert_eq!(*logger.successes.lock().unwrap(), vec!["expense.delete".to_string()]);
    }

    #[test]
    fn test_redirect_rule() {
        let listing = "/dashboard/expenses/";

        assert_eq!(redirect_after_delete(Some("/dashboard/expenses/42"), "42", listing), listing);
        assert_eq!(redirect_after_delete(Some(listing), "42", listing), listing);
        assert_eq!(redirect_after_delete(None, "42", listing), listing);
        assert_eq!(redirect_after_delete(Some(""), "42", listing), listing);
        assert_eq!(redirect_after_delete(Some("/dashboard"), "42", listing), "/dashboard");
    }

    #[test]
    fn test_redirect_rule_substring_sharp_edge() {
        // Unrelated record whose id contains the deleted one
        let listing = "/dashboard/expenses/";
        assert_eq!(redirect_after_delete(Some("/dashboard/expenses/142"), "42", listing), listing);
        // Listing path itself containing the id still yields the listing path
        assert_eq!(redirect_after_delete(None, "expenses", listing), listing);
    }
}
