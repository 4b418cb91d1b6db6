//! Record matcher: submission → natural key → existing entry.

use chrono::{DateTime, NaiveDate, Utc};

use super::key::{optional, required};
use super::{LedgerError, LedgerKind, NaturalKey, Submission};

/// The business date a movement is attributed to.
///
/// The submitted date wins; otherwise the UTC day of `now`. Call this once per
/// submission and reuse the result for both the lookup and the write.
pub fn logical_date(submitted: Option<NaiveDate>, now: DateTime<Utc>) -> NaiveDate {
    submitted.unwrap_or_else(|| now.date_naive())
}

/// A submission with its identity fields validated and normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct Matched {
    pub key: NaturalKey,
    /// Recorded on the entry even when the key scope omits it.
    pub logical_date: NaiveDate,
    pub product_code: Option<String>,
}

/// Validate the identity fields of `submission` and build its key.
///
/// Everything decidable from `kind` and the submission alone is checked here,
/// before the key lock is taken.
pub fn match_submission(
    kind: LedgerKind,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<Matched, LedgerError> {
    let product_name = required("productName", submission.product_name.clone())?;
    let batch = required("batch", submission.batch.clone())?;
    let expire = submission.expire.ok_or(LedgerError::MissingField("expire"))?;
    if !kind.tracks_status() && submission.status.is_some() {
        return Err(LedgerError::Validation(format!(
            "{} entries do not carry a status",
            kind
        )));
    }
    let net_weight = optional(submission.net_weight.clone());
    let logical_date = logical_date(submission.logical_date, now);

    Ok(Matched {
        key: NaturalKey::for_kind(kind, product_name, batch, expire, net_weight, logical_date),
        logical_date,
        product_code: optional(submission.product_code.clone()),
    })
}
