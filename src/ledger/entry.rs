use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LedgerError, LedgerKind, NaturalKey};
use crate::store::Document;

/// The counters that accumulate across submissions for one key.
///
/// Missing fields deserialize as 0, so a submission that only carries
/// `totalQuantity` adds nothing to the box and unit counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quantities {
    pub box_quantity: i64,
    pub unit_quantity: i64,
    pub total_quantity: i64,
}

impl Quantities {
    pub fn total(total_quantity: i64) -> Self {
        Self {
            total_quantity,
            ..Self::default()
        }
    }

    /// Field-wise sum. Fails on overflow rather than wrapping.
    pub fn accumulate(&self, delta: &Quantities) -> Result<Quantities, LedgerError> {
        let add = |field: &str, a: i64, b: i64| {
            a.checked_add(b)
                .ok_or_else(|| LedgerError::Validation(format!("{} overflows", field)))
        };
        Ok(Quantities {
            box_quantity: add("boxQuantity", self.box_quantity, delta.box_quantity)?,
            unit_quantity: add("unitQuantity", self.unit_quantity, delta.unit_quantity)?,
            total_quantity: add("totalQuantity", self.total_quantity, delta.total_quantity)?,
        })
    }
}

/// Price fields. A submission that carries a price replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_price: Option<Decimal>,
}

impl Prices {
    /// Last write wins, per field.
    pub fn overwrite_with(&self, submitted: &Prices) -> Prices {
        Prices {
            actual_price: submitted.actual_price.or(self.actual_price),
            trade_price: submitted.trade_price.or(self.trade_price),
        }
    }
}

/// Review state of an entry on a status-bearing ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EntryStatus::Pending)
    }

    /// `pending → approved | rejected`; nothing leaves a terminal state.
    pub fn can_become(&self, next: EntryStatus) -> bool {
        matches!(
            (self, next),
            (EntryStatus::Pending, EntryStatus::Approved)
                | (EntryStatus::Pending, EntryStatus::Rejected)
        )
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Approved => "approved",
            EntryStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// A stock movement as submitted by a caller.
///
/// Key fields are optional here so that a missing one is reported as a
/// validation error by the ledger, not as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub expire: Option<NaiveDate>,
    #[serde(default)]
    pub net_weight: Option<String>,
    #[serde(default, rename = "date")]
    pub logical_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub quantities: Quantities,
    #[serde(flatten)]
    pub prices: Prices,
    #[serde(default)]
    pub status: Option<EntryStatus>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Submission {
    /// Shorthand for the common case of a lot and a total quantity.
    pub fn lot(product_name: &str, batch: &str, expire: NaiveDate, total_quantity: i64) -> Self {
        Self {
            product_name: Some(product_name.to_string()),
            batch: Some(batch.to_string()),
            expire: Some(expire),
            quantities: Quantities::total(total_quantity),
            ..Self::default()
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.logical_date = Some(date);
        self
    }

    pub fn with_net_weight(mut self, net_weight: &str) -> Self {
        self.net_weight = Some(net_weight.to_string());
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// One quantity record for one product lot on one logical date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub kind: LedgerKind,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    pub batch: String,
    pub expire: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<String>,
    #[serde(rename = "date")]
    pub logical_date: NaiveDate,
    #[serde(flatten)]
    pub quantities: Quantities,
    #[serde(flatten)]
    pub prices: Prices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// How many submissions have been folded into this entry.
    pub submissions: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// The key this entry is stored under.
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::for_kind(
            self.kind,
            self.product_name.clone(),
            self.batch.clone(),
            self.expire,
            self.net_weight.clone(),
            self.logical_date,
        )
    }
}

impl Document for LedgerEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// What `submit` did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    /// A new entry was inserted.
    pub created: bool,
    /// The submission brought `totalQuantity` to zero and the entry was deleted.
    pub removed: bool,
    pub key: NaturalKey,
    pub quantities: Quantities,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
    /// Store version after the write; absent when the entry was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Optional narrowing for `list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerFilter {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub status: Option<EntryStatus>,
    /// Inclusive lower bound on the logical date.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the logical date.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl LedgerFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        self.product_name
            .as_deref()
            .map_or(true, |name| entry.product_name == name)
            && self.batch.as_deref().map_or(true, |batch| entry.batch == batch)
            && self.status.map_or(true, |status| entry.status == Some(status))
            && self.from.map_or(true, |from| entry.logical_date >= from)
            && self.to.map_or(true, |to| entry.logical_date <= to)
    }
}
