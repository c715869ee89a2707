//! Record data models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A persisted record that the edit endpoint can read, update and delete.
///
/// The identifier is assigned at creation and never changes; only the
/// fields carried by [`RecordChanges`] are mutable.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Singular record name used in errors and logs ("expense")
    const KIND: &'static str;

    /// Unique, immutable identifier
    fn id(&self) -> &str;

    /// Overwrite every mutable field with the submitted values
    fn apply_changes(&mut self, changes: &RecordChanges);

    fn title(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn amount(&self) -> f64;
}

/// Decoded update payload. All three fields are always overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordChanges {
    pub title: String,
    pub description: String,
    /// Finite amount in currency units
    pub amount: f64,
}

/// Expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense identifier
    pub id: String,
    /// Short label shown in lists
    pub title: String,
    /// Free-form notes
    #[serde(default)]
    pub description: String,
    /// Amount spent, in currency units
    pub amount: f64,
}

impl Record for Expense {
    const KIND: &'static str = "expense";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_changes(&mut self, changes: &RecordChanges) {
        self.title = changes.title.clone();
        self.description = changes.description.clone();
        self.amount = changes.amount;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Income record (an invoice)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique invoice identifier
    pub id: String,
    /// Short label shown in lists
    pub title: String,
    /// Optional notes; serialized as null when never set
    #[serde(default)]
    pub description: Option<String>,
    /// Amount received, in currency units
    pub amount: f64,
}

impl Record for Invoice {
    const KIND: &'static str = "invoice";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_changes(&mut self, changes: &RecordChanges) {
        self.title = changes.title.clone();
        self.description = Some(changes.description.clone());
        self.amount = changes.amount;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}
