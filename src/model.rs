//! Core data model.
//!
//! A work item is one document moving through the translation office: it
//! arrives under a GO number, gets assigned to translators, and is
//! eventually submitted. Status is never stored — it derives entirely from
//! whether a submission date is present.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Work Item
// ---------------------------------------------------------------------------

/// A tracked translation work item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// Store-assigned identifier. Unique, immutable, monotonically
    /// increasing in creation order.
    pub id: WorkItemId,

    /// Human-readable document id, `DOC-NNNNN`. Derived from `id` once at
    /// creation and never changed afterwards.
    pub doc_id: String,

    /// Government order number the document arrived under. Required.
    pub go_number: String,

    /// Assigned translators as entered, usually comma-separated names.
    /// Opaque free text — the store never parses it.
    pub translators: String,

    /// Deputy director overseeing the work, if any.
    pub deputy_director: Option<String>,

    /// Typist assigned to the final copy, if any.
    pub typist: Option<String>,

    /// Date the document arrived. Required.
    pub arrival_date: NaiveDate,

    /// Date the translation was submitted. `None` means still in progress.
    pub submission_date: Option<NaiveDate>,

    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
}

impl WorkItem {
    /// Derived lifecycle status. The submission date is the sole input.
    pub fn status(&self) -> Status {
        if self.submission_date.is_some() {
            Status::Submitted
        } else {
            Status::InProgress
        }
    }
}

/// Newtype for work item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItemId(pub i64);

impl WorkItemId {
    /// The document id derived from this row id: `DOC-` plus the id
    /// zero-padded to five digits. Ids past 99999 widen rather than wrap.
    pub fn doc_id(self) -> String {
        format!("DOC-{:05}", self.0)
    }
}

impl std::fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a work item. Computed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No submission date recorded yet.
    InProgress,
    /// Submission date recorded.
    Submitted,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::InProgress => "In Progress",
            Status::Submitted => "Submitted",
        };
        write!(f, "{s}")
    }
}

/// Status predicate for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Submitted,
}

impl std::str::FromStr for StatusFilter {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "all" => Ok(StatusFilter::All),
            "inprogress" => Ok(StatusFilter::InProgress),
            "submitted" => Ok(StatusFilter::Submitted),
            _ => Err(crate::error::Error::Other(format!(
                "unknown status filter: {s} (expected all, inprogress or submitted)"
            ))),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusFilter::All => "all",
            StatusFilter::InProgress => "inprogress",
            StatusFilter::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Field set for creating or updating a work item. The store's public
/// input type: both operations share it, and both apply the same trimming,
/// validation, and date normalization.
///
/// Date fields enter as free text; see [`crate::dates::normalize_date`]
/// for the accepted formats.
pub struct NewWorkItem {
    pub(crate) go_number: String,
    pub(crate) translators: String,
    pub(crate) deputy_director: Option<String>,
    pub(crate) typist: Option<String>,
    pub(crate) arrival_date: String,
    pub(crate) submission_date: Option<String>,
}

impl NewWorkItem {
    pub fn new(go_number: impl Into<String>, arrival_date: impl Into<String>) -> Self {
        Self {
            go_number: go_number.into(),
            translators: String::new(),
            deputy_director: None,
            typist: None,
            arrival_date: arrival_date.into(),
            submission_date: None,
        }
    }

    pub fn translators(mut self, names: impl Into<String>) -> Self {
        self.translators = names.into();
        self
    }

    pub fn deputy_director(mut self, name: impl Into<String>) -> Self {
        self.deputy_director = Some(name.into());
        self
    }

    pub fn typist(mut self, name: impl Into<String>) -> Self {
        self.typist = Some(name.into());
        self
    }

    pub fn submission_date(mut self, date: impl Into<String>) -> Self {
        self.submission_date = Some(date.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_id_zero_pads_to_five_digits() {
        assert_eq!(WorkItemId(1).doc_id(), "DOC-00001");
        assert_eq!(WorkItemId(42).doc_id(), "DOC-00042");
        assert_eq!(WorkItemId(99999).doc_id(), "DOC-99999");
    }

    #[test]
    fn doc_id_widens_past_five_digits() {
        assert_eq!(WorkItemId(123456).doc_id(), "DOC-123456");
    }

    #[test]
    fn status_derives_from_submission_date() {
        let mut item = WorkItem {
            id: WorkItemId(1),
            doc_id: WorkItemId(1).doc_id(),
            go_number: "GO-1".to_string(),
            translators: String::new(),
            deputy_director: None,
            typist: None,
            arrival_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            submission_date: None,
            created_at: Utc::now(),
        };
        assert_eq!(item.status(), Status::InProgress);

        item.submission_date = NaiveDate::from_ymd_opt(2025, 2, 1);
        assert_eq!(item.status(), Status::Submitted);
    }

    #[test]
    fn status_filter_parses_known_values() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "inprogress".parse::<StatusFilter>().unwrap(),
            StatusFilter::InProgress
        );
        assert_eq!(
            "submitted".parse::<StatusFilter>().unwrap(),
            StatusFilter::Submitted
        );
        assert!("done".parse::<StatusFilter>().is_err());
    }
}
