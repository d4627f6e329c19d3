//! The read-only query surface the loaders run against.
//!
//! [`TableStore`] is implemented by the REST [`Client`] and by
//! [`InMemoryStore`], which evaluates the same [`TableQuery`] semantics over
//! JSON rows held in memory. Ordering follows PostgreSQL: nulls sort last
//! ascending and first descending.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use billtracker_api::{Client, Filter, SortDirection, Table, TableQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::BillTrackerError;

/// A source of table rows.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Runs a read query, returning the matching rows as JSON objects.
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, BillTrackerError>;
}

#[async_trait]
impl TableStore for Client {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, BillTrackerError> {
        Ok(self.get_rows::<Value>(query).await?)
    }
}

/// Runs `query` against `store` and deserializes the rows as `T`.
pub async fn select_as<S, T>(store: &S, query: &TableQuery) -> Result<Vec<T>, BillTrackerError>
where
    S: TableStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .select(query)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(BillTrackerError::from))
        .collect()
}

/// In-memory table store.
///
/// Every query is recorded so callers can inspect what was requested.
/// Tables marked with [`InMemoryStore::fail_table`] return a store error.
#[derive(Default)]
pub struct InMemoryStore {
    tables: HashMap<Table, Vec<Value>>,
    failing: HashSet<Table>,
    requests: Mutex<Vec<TableQuery>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rows` to `table`.
    pub fn with_rows<T: Serialize>(
        mut self,
        table: Table,
        rows: &[T],
    ) -> Result<Self, BillTrackerError> {
        for row in rows {
            self.insert(table, row)?;
        }
        Ok(self)
    }

    /// Appends a single row to `table`.
    pub fn insert<T: Serialize>(&mut self, table: Table, row: &T) -> Result<(), BillTrackerError> {
        let value = serde_json::to_value(row)?;
        if !value.is_object() {
            return Err(BillTrackerError::InvalidInput(format!(
                "rows of {} must serialize to JSON objects",
                table
            )));
        }
        self.tables.entry(table).or_default().push(value);
        Ok(())
    }

    /// Makes every read of `table` fail.
    pub fn fail_table(mut self, table: Table) -> Self {
        self.failing.insert(table);
        self
    }

    /// All queries received so far, oldest first.
    pub fn requests(&self) -> Vec<TableQuery> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of queries received for `table`.
    pub fn request_count(&self, table: Table) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|q| q.table == table)
            .count()
    }

    fn evaluate(&self, query: &TableQuery) -> Vec<Value> {
        let mut rows: Vec<Value> = self
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| filter_matches(f, row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(column) = &query.common.order_by {
            rows.sort_by(|a, b| {
                let ord = compare_nullable(a.get(column), b.get(column));
                match query.common.sort_direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let offset = query.common.offset.unwrap_or(0);
        let limit = query.common.limit.unwrap_or(usize::MAX);
        rows.into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| project(row, &query.columns))
            .collect()
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>, BillTrackerError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());
        if self.failing.contains(&query.table) {
            return Err(BillTrackerError::Store(format!(
                "{} is unavailable",
                query.table
            )));
        }
        Ok(self.evaluate(query))
    }
}

fn filter_matches(filter: &Filter, row: &Value) -> bool {
    let cell = row.get(filter.column());
    match filter {
        Filter::Eq { value, .. } => cell.is_some_and(|c| cell_equals(c, value)),
        Filter::In { values, .. } => {
            cell.is_some_and(|c| values.iter().any(|v| cell_equals(c, v)))
        }
    }
}

/// Compares a JSON cell with a filter operand the way the REST layer does:
/// by the cell's textual value. Null never matches.
fn cell_equals(cell: &Value, operand: &str) -> bool {
    match cell {
        Value::String(s) => s == operand,
        Value::Number(n) => {
            n.to_string() == operand
                || match (n.as_f64(), operand.parse::<f64>()) {
                    (Some(a), Ok(b)) => a == b,
                    _ => false,
                }
        }
        Value::Bool(b) => b.to_string() == operand,
        _ => false,
    }
}

/// Ascending comparison with nulls (and missing cells) last.
fn compare_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn project(row: Value, columns: &[String]) -> Value {
    if columns.is_empty() {
        return row;
    }
    match row {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| columns.iter().any(|c| c == key))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use billtracker_api::Query;
    use serde_json::json;

    use super::*;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_rows(
                Table::Bills,
                &[
                    json!({"bill_id": 1, "committee": "Finance", "status_date": "2024-03-01"}),
                    json!({"bill_id": 2, "committee": "Judiciary", "status_date": null}),
                    json!({"bill_id": 3, "committee": "Finance", "status_date": "2024-01-15"}),
                    json!({"bill_id": 4, "committee": "Rules", "status_date": "2024-02-10"}),
                ],
            )
            .unwrap()
    }

    fn ids(rows: &[Value]) -> Vec<i64> {
        rows.iter().map(|r| r["bill_id"].as_i64().unwrap()).collect()
    }

    #[tokio::test]
    async fn eq_filter_matches_text_and_numbers() {
        let store = store();
        let rows = store
            .select(&TableQuery::new(Table::Bills).with_eq("committee", "Finance"))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![1, 3]);

        let rows = store
            .select(&TableQuery::new(Table::Bills).with_eq("bill_id", 4))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![4]);
    }

    #[tokio::test]
    async fn in_filter_matches_any_value() {
        let rows = store()
            .select(&TableQuery::new(Table::Bills).with_in("bill_id", &[4, 2, 9]))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![2, 4]);
    }

    #[tokio::test]
    async fn descending_order_puts_nulls_first() {
        let rows = store()
            .select(
                &TableQuery::new(Table::Bills)
                    .with_order_by("status_date")
                    .with_sort_direction(SortDirection::Desc),
            )
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![2, 1, 4, 3]);
    }

    #[tokio::test]
    async fn ascending_order_puts_nulls_last() {
        let rows = store()
            .select(&TableQuery::new(Table::Bills).with_order_by("status_date"))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![3, 4, 1, 2]);
    }

    #[tokio::test]
    async fn range_windows_the_ordered_rows() {
        let rows = store()
            .select(
                &TableQuery::new(Table::Bills)
                    .with_order_by("bill_id")
                    .with_range(1, 2),
            )
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![2, 3]);
    }

    #[tokio::test]
    async fn columns_are_projected() {
        let rows = store()
            .select(
                &TableQuery::new(Table::Bills)
                    .with_columns(&["bill_id"])
                    .with_eq("bill_id", 1),
            )
            .await
            .unwrap();
        assert_eq!(rows, vec![json!({"bill_id": 1})]);
    }

    #[tokio::test]
    async fn failing_table_returns_store_error_and_is_recorded() {
        let store = store().fail_table(Table::Bills);
        let result = store.select(&TableQuery::new(Table::Bills)).await;
        let err = result.unwrap_err();
        assert!(matches!(err, BillTrackerError::Store(_)));
        assert_eq!(err.to_string(), "Store error: Bills is unavailable");
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(store.request_count(Table::Bills), 1);
        assert_eq!(store.request_count(Table::People), 0);
    }

    #[tokio::test]
    async fn unknown_table_is_empty() {
        let rows = store()
            .select(&TableQuery::new(Table::Votes))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let mut store = InMemoryStore::new();
        assert!(store.insert(Table::Bills, &5).is_err());
    }

    #[tokio::test]
    async fn select_as_deserializes_rows() {
        let bills: Vec<billtracker_api::types::Bill> =
            select_as(&store(), &TableQuery::new(Table::Bills).with_eq("bill_id", 3))
                .await
                .unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].status_month().as_deref(), Some("2024-01"));
    }
}
