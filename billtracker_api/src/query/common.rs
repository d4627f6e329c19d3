//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by query builders. Provides URL serialization and
/// shared builder methods for ordering and windowing.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Skips the first `offset` rows.
    fn with_offset(mut self, offset: usize) -> Self
    where
        Self: Sized,
    {
        self.get_common().offset = Some(offset);
        self
    }

    /// Returns at most `limit` rows.
    fn with_limit(mut self, limit: usize) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Restricts results to the inclusive row window `[from, to]`.
    ///
    /// An empty window (`to < from`) yields a zero limit.
    fn with_range(mut self, from: usize, to: usize) -> Self
    where
        Self: Sized,
    {
        let common = self.get_common();
        common.offset = Some(from);
        common.limit = Some((to + 1).saturating_sub(from));
        self
    }

    /// Orders results by the given column.
    fn with_order_by(mut self, column: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().order_by = Some(column.to_string());
        self
    }

    /// Sets the sort direction (ascending or descending).
    fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_direction = sort_direction;
        self
    }
}

/// Sort order for query results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first). This is the default.
    #[default]
    Asc,
    /// Descending order (newest/largest first).
    Desc,
}
impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
        )
    }
}
impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types: ordering and the row window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    /// Rows to skip. `None` starts at the first row.
    pub offset: Option<usize>,
    /// Maximum rows to return. `None` uses the server default.
    pub limit: Option<usize>,
    /// Column to order by. `None` leaves the order to the server.
    pub order_by: Option<String>,
    /// Sort direction for `order_by`. Defaults to ascending.
    pub sort_direction: SortDirection,
}

impl QueryCommon {
    /// Appends the ordering and window parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(order_by) = &self.order_by {
            url.query_pairs_mut().append_pair(
                "order",
                format!("{}.{}", order_by, self.sort_direction).as_str(),
            );
        };
        if let Some(offset) = self.offset {
            url.query_pairs_mut()
                .append_pair("offset", &offset.to_string());
        };
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        url
    }
}
