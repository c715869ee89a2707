//! Form payload decoding
//!
//! Write requests arrive as `application/x-www-form-urlencoded` bodies.
//! Decoding produces either a typed value or a `CoreError`, never a panic.

use crate::error::{CoreError, CoreResult};
use crate::models::RecordChanges;
use std::collections::HashMap;

/// Submitted form fields. When a name repeats, the first value wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    fields: HashMap<String, String>,
}

impl FormFields {
    /// Parse an urlencoded body. Pairs that are not valid UTF-8 after
    /// percent-decoding are dropped.
    pub fn parse(body: &str) -> Self {
        let mut fields = HashMap::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value)) else {
                continue;
            };
            fields.entry(key).or_insert(value);
        }
        Self { fields }
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in iter {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { fields }
    }
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Write intent selected by the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Update,
    Delete,
}

impl Intent {
    /// Name of the discriminator field
    pub const FIELD: &'static str = "intent";

    /// Read the intent from a form; anything but `update`/`delete` is a bad request
    pub fn from_form(fields: &FormFields) -> CoreResult<Self> {
        match fields.get(Self::FIELD) {
            Some(value) => value.parse().map_err(|message| CoreError::BadRequest { message }),
            None => Err(CoreError::BadRequest {
                message: "missing intent".to_string(),
            }),
        }
    }
}

impl std::str::FromStr for Intent {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact match: the values come from our own submit buttons
        match s {
            "update" => Ok(Intent::Update),
            "delete" => Ok(Intent::Delete),
            _ => Err(format!("unknown intent: {}", s)),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Update => write!(f, "update"),
            Intent::Delete => write!(f, "delete"),
        }
    }
}

impl RecordChanges {
    /// Decode the update payload: `title`, `description` and `amount` are
    /// all required, and `amount` must be a finite decimal number.
    pub fn from_form(fields: &FormFields) -> CoreResult<Self> {
        let title = required(fields, "title")?;
        let description = required(fields, "description")?;
        let amount = parse_amount(required(fields, "amount")?)?;

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            amount,
        })
    }
}

fn required<'a>(fields: &'a FormFields, name: &str) -> CoreResult<&'a str> {
    fields.get(name).ok_or_else(|| CoreError::BadInput {
        field: name.to_string(),
        reason: "field is required".to_string(),
    })
}

/// Parse a submitted amount. Surrounding whitespace is ignored; NaN and
/// infinities are rejected.
pub fn parse_amount(raw: &str) -> CoreResult<f64> {
    let invalid = || CoreError::BadInput {
        field: "amount".to_string(),
        reason: format!("'{}' is not a finite number", raw),
    };

    let amount: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(invalid())
    }
}
