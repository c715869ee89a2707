//! Core record handling for finboard
//!
//! - models: the expense and invoice records
//! - kind: resource kind descriptors (record type + routes)
//! - form: urlencoded form decoding, intent and update payload
//! - store: persistence contract with in-memory and JSON file stores
//! - endpoint: the generic read/update/delete endpoint

pub mod endpoint;
pub mod error;
pub mod form;
pub mod kind;
pub mod models;
pub mod store;

pub use endpoint::{redirect_after_delete, ActionOutcome, RecordEndpoint, UpdateAck};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use form::{FormFields, Intent};
pub use kind::{Expenses, Income, ResourceKind};
pub use models::{Expense, Invoice, Record, RecordChanges};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreRef};
