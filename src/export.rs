//! CSV export of work item records.
//!
//! Serializes records in the order given — callers feed it the ascending
//! export list from the store. Dates render in ISO form; an unsubmitted
//! record gets an empty submission field.

use std::io::Write;

use crate::error::Result;
use crate::model::WorkItem;

const HEADER: [&str; 7] = [
    "Doc ID",
    "GO Number",
    "Translators",
    "Deputy Director",
    "Typist",
    "Arrival Date",
    "Submission Date",
];

/// Write a header row plus one row per record to `out`.
pub fn write_csv<W: Write>(items: &[WorkItem], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for item in items {
        let arrival = item.arrival_date.to_string();
        let submission = item
            .submission_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        writer.write_record([
            item.doc_id.as_str(),
            item.go_number.as_str(),
            item.translators.as_str(),
            item.deputy_director.as_deref().unwrap_or(""),
            item.typist.as_deref().unwrap_or(""),
            arrival.as_str(),
            submission.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkItemId;
    use chrono::{NaiveDate, Utc};

    fn item(id: i64, go_number: &str, submitted: Option<(i32, u32, u32)>) -> WorkItem {
        WorkItem {
            id: WorkItemId(id),
            doc_id: WorkItemId(id).doc_id(),
            go_number: go_number.to_string(),
            translators: "Amal, Sayed".to_string(),
            deputy_director: Some("N. Farouk".to_string()),
            typist: None,
            arrival_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            submission_date: submitted.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            created_at: Utc::now(),
        }
    }

    fn render(items: &[WorkItem]) -> String {
        let mut buf = Vec::new();
        write_csv(items, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_row_matches_report_columns() {
        let out = render(&[]);
        assert_eq!(
            out.lines().next().unwrap(),
            "Doc ID,GO Number,Translators,Deputy Director,Typist,Arrival Date,Submission Date"
        );
    }

    #[test]
    fn submitted_and_unsubmitted_rows() {
        let out = render(&[
            item(1, "GO-42", None),
            item(2, "GO-43", Some((2025, 2, 1))),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "DOC-00001,GO-42,\"Amal, Sayed\",N. Farouk,,2025-01-10,"
        );
        assert_eq!(
            lines[2],
            "DOC-00002,GO-43,\"Amal, Sayed\",N. Farouk,,2025-01-10,2025-02-01"
        );
    }
}
