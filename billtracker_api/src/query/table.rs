use url::Url;

use super::{common::QueryCommon, Query};

/// The tables exposed by the hosted database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Bills,
    People,
    Sponsors,
    History,
    Rollcalls,
    Votes,
}
impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Table::Bills => "Bills",
                Table::People => "People",
                Table::Sponsors => "Sponsors",
                Table::History => "History",
                Table::Rollcalls => "Rollcalls",
                Table::Votes => "Votes",
            }
        )?;
        Ok(())
    }
}

/// A row filter on a single column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`.
    Eq { column: String, value: String },
    /// `column IN (values...)`.
    In { column: String, values: Vec<String> },
}

impl Filter {
    /// The column this filter constrains.
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } => column,
        }
    }

    fn to_param(&self) -> String {
        match self {
            Filter::Eq { value, .. } => format!("eq.{}", value),
            Filter::In { values, .. } => format!(
                "in.({})",
                values
                    .iter()
                    .map(|v| quote_list_value(v))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

/// Values inside an `in.(...)` list must be double-quoted when they contain
/// list delimiters, quotes or whitespace.
fn quote_list_value(value: &str) -> String {
    let reserved = value
        .chars()
        .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\') || c.is_whitespace());
    if !reserved {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// A read against one table: projection, filters, ordering and row window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableQuery {
    pub table: Table,
    pub common: QueryCommon,
    /// Columns to return. Empty selects every column.
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
}

impl Query for TableQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };
        url.query_pairs_mut().append_pair("select", &select);
        for filter in self.filters.iter() {
            url.query_pairs_mut()
                .append_pair(filter.column(), &filter.to_param());
        }
        self.common.add_to_url(&url)
    }
}

impl TableQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            common: QueryCommon::default(),
            columns: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// REST path of the table, relative to the project URL.
    pub fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn with_eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_in<T: ToString>(mut self, column: &str, values: &[T]) -> Self {
        self.filters.push(Filter::In {
            column: column.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
        self
    }
}
