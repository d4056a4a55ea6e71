//! Metric instrument factories for doctrack.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"doctrack"` meter.

use opentelemetry::metrics::{Counter, Meter};

/// Returns the shared meter for doctrack instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("doctrack")
}

/// Counter: work item records created.
pub fn records_created() -> Counter<u64> {
    meter()
        .u64_counter("doctrack.records.created")
        .with_description("Number of work item records created")
        .build()
}

/// Counter: work item records updated in place.
pub fn records_updated() -> Counter<u64> {
    meter()
        .u64_counter("doctrack.records.updated")
        .with_description("Number of work item records updated")
        .build()
}

/// Counter: submission stamps applied.
pub fn records_submitted() -> Counter<u64> {
    meter()
        .u64_counter("doctrack.records.submitted")
        .with_description("Number of work items marked submitted")
        .build()
}

/// Counter: work item records hard-deleted.
pub fn records_deleted() -> Counter<u64> {
    meter()
        .u64_counter("doctrack.records.deleted")
        .with_description("Number of work item records deleted")
        .build()
}

/// Counter: list queries served.
/// Labels: `status` ("all" | "inprogress" | "submitted").
pub fn list_queries() -> Counter<u64> {
    meter()
        .u64_counter("doctrack.list.queries")
        .with_description("Number of list queries served")
        .build()
}
