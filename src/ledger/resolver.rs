//! Upsert resolver: decides what a submission does to the entry for its key.
//!
//! Pure: no store access, `now` passed in.

use chrono::{DateTime, Utc};

use super::matcher::Matched;
use super::{EntryStatus, LedgerEntry, LedgerError, LedgerKind, Submission};

/// The write the gateway must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No entry for the key yet.
    Insert(LedgerEntry),
    /// Quantities added, prices and remarks overwritten.
    Accumulate(LedgerEntry),
    /// Status moved out of `pending`; quantities untouched.
    Transition(LedgerEntry),
    /// The accumulation reached `totalQuantity == 0`; delete the entry.
    /// Carries the entry as it would have been stored.
    Remove(LedgerEntry),
}

impl Resolution {
    pub fn entry(&self) -> &LedgerEntry {
        match self {
            Resolution::Insert(entry)
            | Resolution::Accumulate(entry)
            | Resolution::Transition(entry)
            | Resolution::Remove(entry) => entry,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Insert(_) => "insert",
            Resolution::Accumulate(_) => "accumulate",
            Resolution::Transition(_) => "transition",
            Resolution::Remove(_) => "remove",
        }
    }
}

pub fn resolve(
    kind: LedgerKind,
    matched: &Matched,
    existing: Option<&LedgerEntry>,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<Resolution, LedgerError> {
    match existing {
        None => insert(kind, matched, submission, now),
        Some(entry) => update(kind, entry, submission, now),
    }
}

fn insert(
    kind: LedgerKind,
    matched: &Matched,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<Resolution, LedgerError> {
    // only decidable once the key is known to be unused: on a pending entry
    // the same status is a transition
    let status = if kind.tracks_status() {
        match submission.status {
            None | Some(EntryStatus::Pending) => Some(EntryStatus::Pending),
            Some(other) => {
                return Err(LedgerError::Validation(format!(
                    "new {} entries start as pending, not {}",
                    kind, other
                )))
            }
        }
    } else {
        None
    };

    let key = &matched.key;
    Ok(Resolution::Insert(LedgerEntry {
        id: key.document_id(),
        kind,
        product_name: key.product_name.clone(),
        product_code: matched.product_code.clone(),
        batch: key.batch.clone(),
        expire: key.expire,
        net_weight: key.net_weight.clone(),
        logical_date: matched.logical_date,
        quantities: submission.quantities,
        prices: submission.prices.clone(),
        status,
        remarks: submission.remarks.clone(),
        submissions: 1,
        created_at: now,
        updated_at: now,
    }))
}

fn update(
    kind: LedgerKind,
    entry: &LedgerEntry,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<Resolution, LedgerError> {
    if kind.tracks_status() {
        let current = entry.status.unwrap_or(EntryStatus::Pending);
        if current.is_terminal() {
            return Err(LedgerError::Conflict(format!(
                "{} entry {} is {} and accepts no further submissions",
                kind, entry.id, current
            )));
        }
        if let Some(next) = submission.status.filter(|s| *s != EntryStatus::Pending) {
            return Ok(Resolution::Transition(transition(entry, next, now)?));
        }
    }

    let mut next = entry.clone();
    next.quantities = entry.quantities.accumulate(&submission.quantities)?;
    next.prices = entry.prices.overwrite_with(&submission.prices);
    if let Some(code) = submission.product_code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        next.product_code = Some(code.to_string());
    }
    if submission.remarks.is_some() {
        next.remarks = submission.remarks.clone();
    }
    next.submissions = entry.submissions.saturating_add(1);
    next.updated_at = now;

    if next.quantities.total_quantity == 0 {
        Ok(Resolution::Remove(next))
    } else {
        Ok(Resolution::Accumulate(next))
    }
}

/// Apply a status change, enforcing `pending → approved | rejected`.
pub fn transition(
    entry: &LedgerEntry,
    next: EntryStatus,
    now: DateTime<Utc>,
) -> Result<LedgerEntry, LedgerError> {
    let current = entry.status.ok_or_else(|| {
        LedgerError::Validation(format!("{} entries do not carry a status", entry.kind))
    })?;
    if !current.can_become(next) {
        return Err(LedgerError::Conflict(format!(
            "cannot move {} entry {} from {} to {}",
            entry.kind, entry.id, current, next
        )));
    }

    let mut moved = entry.clone();
    moved.status = Some(next);
    moved.updated_at = now;
    Ok(moved)
}
