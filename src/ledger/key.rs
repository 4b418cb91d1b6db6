use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{KeyScope, LedgerError, LedgerKind};

/// Identifies the one accumulating entry a submission folds into.
///
/// `logical_date` is `None` exactly when the ledger's key scope is
/// [`KeyScope::Lot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalKey {
    pub product_name: String,
    pub batch: String,
    pub expire: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<String>,
    #[serde(default, rename = "date", skip_serializing_if = "Option::is_none")]
    pub logical_date: Option<NaiveDate>,
}

impl NaturalKey {
    /// Build the key a ledger of `kind` uses for these identity fields.
    pub fn for_kind(
        kind: LedgerKind,
        product_name: String,
        batch: String,
        expire: NaiveDate,
        net_weight: Option<String>,
        logical_date: NaiveDate,
    ) -> Self {
        Self {
            product_name,
            batch,
            expire,
            net_weight,
            logical_date: match kind.key_scope() {
                KeyScope::LotPerDay => Some(logical_date),
                KeyScope::Lot => None,
            },
        }
    }

    /// Normalise a caller-supplied key for `kind`.
    ///
    /// Trims text fields, folds a blank net weight to `None`, drops the date for
    /// lot-scoped ledgers and insists on one for per-day ledgers.
    pub fn scoped(mut self, kind: LedgerKind) -> Result<Self, LedgerError> {
        self.product_name = required("productName", Some(self.product_name))?;
        self.batch = required("batch", Some(self.batch))?;
        self.net_weight = optional(self.net_weight);
        match kind.key_scope() {
            KeyScope::Lot => self.logical_date = None,
            KeyScope::LotPerDay if self.logical_date.is_none() => {
                return Err(LedgerError::Validation(format!(
                    "{} keys include a date",
                    kind
                )))
            }
            KeyScope::LotPerDay => {}
        }
        Ok(self)
    }

    /// Deterministic document id.
    ///
    /// Components are joined with `/`; `%` and `/` inside a component are
    /// percent-escaped and absent components render empty, so distinct keys
    /// never share an id.
    pub fn document_id(&self) -> String {
        let expire = self.expire.to_string();
        let date = self.logical_date.map(|d| d.to_string()).unwrap_or_default();
        [
            self.product_name.as_str(),
            self.batch.as_str(),
            expire.as_str(),
            self.net_weight.as_deref().unwrap_or(""),
            date.as_str(),
        ]
        .iter()
        .map(|component| escape(component))
        .collect::<Vec<_>>()
        .join("/")
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.document_id())
    }
}

fn escape(component: &str) -> String {
    component.replace('%', "%25").replace('/', "%2F")
}

/// Trimmed, non-empty value of a required field.
pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, LedgerError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LedgerError::MissingField(field)),
    }
}

/// Trimmed value of an optional field, blank folded to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
