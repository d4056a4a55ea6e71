//! Work item store operations: create, update, submit, delete, list.

use crate::dates::{self, DateParsing};
use crate::error::{Error, Result};
use crate::model::{NewWorkItem, StatusFilter, WorkItem, WorkItemId};
use crate::telemetry::metrics;
use opentelemetry::KeyValue;

impl super::Db {
    /// Create a work item and derive its document id.
    ///
    /// The document id comes from the row id, which is unknown until the
    /// insert returns. Insert with `doc_id` NULL, write the derived value
    /// back onto the same row, and commit both steps as one transaction so
    /// no visible row ever lacks its document id.
    pub async fn create_work_item(&self, new: NewWorkItem) -> Result<WorkItem> {
        let fields = validate(new, self.date_parsing)?;

        let mut tx = self.pool.begin().await?;

        let row: (i64,) = sqlx::query_as(
            "INSERT INTO work_items
                 (doc_id, go_number, translators, deputy_director, typist, arrival_date, submission_date)
             VALUES (NULL, $1, $2, $3, $4, CAST($5 AS DATE), CAST($6 AS DATE))
             RETURNING id",
        )
        .bind(&fields.go_number)
        .bind(&fields.translators)
        .bind(&fields.deputy_director)
        .bind(&fields.typist)
        .bind(&fields.arrival_date)
        .bind(&fields.submission_date)
        .fetch_one(&mut *tx)
        .await?;

        let id = WorkItemId(row.0);
        sqlx::query("UPDATE work_items SET doc_id = $1 WHERE id = $2")
            .bind(id.doc_id())
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        metrics::records_created().add(1, &[]);

        self.get_work_item(id).await
    }

    /// Update an existing work item with the same field set and validation
    /// as create. The document id and creation timestamp never change.
    pub async fn update_work_item(&self, id: WorkItemId, new: NewWorkItem) -> Result<WorkItem> {
        let fields = validate(new, self.date_parsing)?;

        let affected = sqlx::query(
            "UPDATE work_items
                SET go_number = $1, translators = $2, deputy_director = $3, typist = $4,
                    arrival_date = CAST($5 AS DATE), submission_date = CAST($6 AS DATE)
              WHERE id = $7",
        )
        .bind(&fields.go_number)
        .bind(&fields.translators)
        .bind(&fields.deputy_director)
        .bind(&fields.typist)
        .bind(&fields.arrival_date)
        .bind(&fields.submission_date)
        .bind(id.0)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(Error::NotFound(format!("{id}")));
        }

        metrics::records_updated().add(1, &[]);

        self.get_work_item(id).await
    }

    /// Stamp today's date (server local) as the submission date.
    ///
    /// Unconditional: re-submitting overwrites the stamp with the current
    /// date. A missing id is a no-op, like delete.
    pub async fn mark_submitted(&self, id: WorkItemId) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        let affected = sqlx::query("UPDATE work_items SET submission_date = $1 WHERE id = $2")
            .bind(today)
            .bind(id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected > 0 {
            metrics::records_submitted().add(1, &[]);
        }
        Ok(())
    }

    /// Hard delete by id. No tombstone, no undo; a missing id is a no-op.
    pub async fn delete_work_item(&self, id: WorkItemId) -> Result<()> {
        let affected = sqlx::query("DELETE FROM work_items WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected > 0 {
            metrics::records_deleted().add(1, &[]);
        }
        Ok(())
    }

    /// Get a work item by id.
    pub async fn get_work_item(&self, id: WorkItemId) -> Result<WorkItem> {
        let row: Option<WorkItemRow> = sqlx::query_as(
            "SELECT id, doc_id, go_number, translators, deputy_director, typist,
                    arrival_date, submission_date, created_at
               FROM work_items WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(WorkItemRow::into_work_item)
            .ok_or_else(|| Error::NotFound(format!("{id}")))
    }

    /// List work items, newest first.
    ///
    /// A non-empty query matches case-insensitively as a substring of any
    /// of: document id, GO number, translators, deputy director, typist.
    /// The status filter is ANDed on top. Results are a snapshot at call
    /// time, ordered by descending id.
    pub async fn list_work_items(
        &self,
        query: &str,
        filter: StatusFilter,
    ) -> Result<Vec<WorkItem>> {
        let q = query.trim();

        let mut conditions: Vec<&str> = Vec::new();
        if !q.is_empty() {
            conditions.push(
                "(doc_id ILIKE $1 OR go_number ILIKE $1 OR translators ILIKE $1
                  OR deputy_director ILIKE $1 OR typist ILIKE $1)",
            );
        }
        match filter {
            StatusFilter::InProgress => conditions.push("submission_date IS NULL"),
            StatusFilter::Submitted => conditions.push("submission_date IS NOT NULL"),
            StatusFilter::All => {}
        }

        let mut sql = String::from(
            "SELECT id, doc_id, go_number, translators, deputy_director, typist,
                    arrival_date, submission_date, created_at
               FROM work_items",
        );
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY id DESC");

        let mut select = sqlx::query_as::<_, WorkItemRow>(&sql);
        if !q.is_empty() {
            select = select.bind(format!("%{q}%"));
        }
        let rows = select.fetch_all(&self.pool).await?;

        metrics::list_queries().add(1, &[KeyValue::new("status", filter.to_string())]);

        Ok(rows.into_iter().map(WorkItemRow::into_work_item).collect())
    }

    /// Full unfiltered list in ascending id order, for export.
    pub async fn list_for_export(&self) -> Result<Vec<WorkItem>> {
        let rows: Vec<WorkItemRow> = sqlx::query_as(
            "SELECT id, doc_id, go_number, translators, deputy_director, typist,
                    arrival_date, submission_date, created_at
               FROM work_items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WorkItemRow::into_work_item).collect())
    }
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Trimmed, normalized field set ready to bind. Dates stay textual here:
/// under lenient handling the database performs the final cast.
struct FieldSet {
    go_number: String,
    translators: String,
    deputy_director: Option<String>,
    typist: Option<String>,
    arrival_date: String,
    submission_date: Option<String>,
}

fn validate(new: NewWorkItem, mode: DateParsing) -> Result<FieldSet> {
    let go_number = new.go_number.trim().to_string();
    if go_number.is_empty() {
        return Err(Error::Validation("GO number is required".to_string()));
    }

    let arrival_date = dates::normalize_date(&new.arrival_date)
        .ok_or_else(|| Error::Validation("arrival date is required".to_string()))?;
    let submission_date = new.submission_date.as_deref().and_then(dates::normalize_date);

    if mode == DateParsing::Strict {
        ensure_calendar_date("arrival date", &arrival_date)?;
        if let Some(ref s) = submission_date {
            ensure_calendar_date("submission date", s)?;
        }
    }

    Ok(FieldSet {
        go_number,
        translators: new.translators.trim().to_string(),
        deputy_director: non_empty(new.deputy_director),
        typist: non_empty(new.typist),
        arrival_date,
        submission_date,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn ensure_calendar_date(field: &str, value: &str) -> Result<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| Error::Validation(format!("{field} is not a valid calendar date: {value}")))
}

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// Internal row type for sqlx::FromRow.
#[derive(sqlx::FromRow)]
struct WorkItemRow {
    id: i64,
    doc_id: Option<String>,
    go_number: String,
    translators: String,
    deputy_director: Option<String>,
    typist: Option<String>,
    arrival_date: chrono::NaiveDate,
    submission_date: Option<chrono::NaiveDate>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl WorkItemRow {
    fn into_work_item(self) -> WorkItem {
        let id = WorkItemId(self.id);
        WorkItem {
            id,
            // Transactional create means a visible row always carries its
            // doc_id; re-derive if a pre-migration row lacks one.
            doc_id: self.doc_id.unwrap_or_else(|| id.doc_id()),
            go_number: self.go_number,
            translators: self.translators,
            deputy_director: self.deputy_director,
            typist: self.typist,
            arrival_date: self.arrival_date,
            submission_date: self.submission_date,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewWorkItem {
        NewWorkItem::new("GO-42", "2025-01-10")
    }

    #[test]
    fn validate_trims_and_normalizes() {
        let new = NewWorkItem::new("  GO-42  ", " 30/08/2025 ")
            .translators("  Amal, Sayed ")
            .deputy_director("   ")
            .typist(" Rania ");
        let fields = validate(new, DateParsing::Lenient).unwrap();

        assert_eq!(fields.go_number, "GO-42");
        assert_eq!(fields.arrival_date, "2025-08-30");
        assert_eq!(fields.translators, "Amal, Sayed");
        assert_eq!(fields.deputy_director, None);
        assert_eq!(fields.typist.as_deref(), Some("Rania"));
        assert_eq!(fields.submission_date, None);
    }

    #[test]
    fn validate_rejects_empty_go_number() {
        let new = NewWorkItem::new("   ", "2025-01-10");
        assert!(matches!(
            validate(new, DateParsing::Lenient),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_arrival_date() {
        let new = NewWorkItem::new("GO-42", "  ");
        assert!(matches!(
            validate(new, DateParsing::Lenient),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn lenient_mode_passes_garbage_dates_through() {
        let new = draft().submission_date("not-a-date");
        let fields = validate(new, DateParsing::Lenient).unwrap();
        assert_eq!(fields.submission_date.as_deref(), Some("not-a-date"));
    }

    #[test]
    fn strict_mode_rejects_garbage_dates() {
        let new = draft().submission_date("not-a-date");
        assert!(matches!(
            validate(new, DateParsing::Strict),
            Err(Error::Validation(_))
        ));

        let new = NewWorkItem::new("GO-42", "sometime last week");
        assert!(matches!(
            validate(new, DateParsing::Strict),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn strict_mode_accepts_all_supported_formats() {
        let cases = [
            ("2025-01-10", "2025-01-10"),
            ("10/01/2025", "2025-01-10"),
            ("10-01-2025", "2025-01-10"),
            // Day slot of 22 rules out day-first, so month-first applies.
            ("01/22/2025", "2025-01-22"),
        ];
        for (input, expected) in cases {
            let new = NewWorkItem::new("GO-42", input);
            let fields = validate(new, DateParsing::Strict).unwrap();
            assert_eq!(fields.arrival_date, expected, "input {input}");
        }
    }
}
