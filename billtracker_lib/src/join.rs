//! Batched id lookups and the in-memory merge step shared by the loaders.
//!
//! A join is: collect foreign ids from the left rows, fetch the right rows
//! with one `IN`-list query ([`fetch_in`]), index them by key ([`index_by`]),
//! then [`merge`] each left row with its match.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use billtracker_api::TableQuery;
use serde::de::DeserializeOwned;

use crate::error::BillTrackerError;
use crate::store::{select_as, TableStore};

/// Fetches the rows of `base` whose `column` is one of `keys`, in a single query.
///
/// Duplicate keys are sent once. No query is issued for an empty key set.
pub async fn fetch_in<S, T>(
    store: &S,
    base: TableQuery,
    column: &str,
    keys: &[i64],
) -> Result<Vec<T>, BillTrackerError>
where
    S: TableStore + ?Sized,
    T: DeserializeOwned,
{
    let keys = unique(keys);
    if keys.is_empty() {
        return Ok(Vec::new());
    }
    select_as(store, &base.with_in(column, &keys)).await
}

/// Indexes rows by `key_of`. When several rows share a key, the first one wins.
pub fn index_by<K, T, I, F>(rows: I, key_of: F) -> HashMap<K, T>
where
    K: Eq + Hash,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::new();
    for row in rows {
        index.entry(key_of(&row)).or_insert(row);
    }
    index
}

/// [`fetch_in`] followed by [`index_by`].
pub async fn lookup<S, T, F>(
    store: &S,
    base: TableQuery,
    column: &str,
    keys: &[i64],
    key_of: F,
) -> Result<HashMap<i64, T>, BillTrackerError>
where
    S: TableStore + ?Sized,
    T: DeserializeOwned,
    F: Fn(&T) -> i64,
{
    let rows: Vec<T> = fetch_in(store, base, column, keys).await?;
    Ok(index_by(rows, key_of))
}

/// Pairs every left row with its indexed match.
///
/// `combine` receives `None` when the left row has no key or the key is not
/// in the index; returning `None` from it drops the row. Left order is kept.
pub fn merge<L, R, O, K, C>(left: Vec<L>, index: &HashMap<i64, R>, key_of: K, mut combine: C) -> Vec<O>
where
    K: Fn(&L) -> Option<i64>,
    C: FnMut(L, Option<&R>) -> Option<O>,
{
    left.into_iter()
        .filter_map(|row| {
            let matched = key_of(&row).and_then(|key| index.get(&key));
            combine(row, matched)
        })
        .collect()
}

fn unique(keys: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    keys.iter().copied().filter(|k| seen.insert(*k)).collect()
}

#[cfg(test)]
mod tests {
    use billtracker_api::types::Person;
    use billtracker_api::{Filter, Table};

    use super::*;
    use crate::store::InMemoryStore;

    fn people_store() -> InMemoryStore {
        InMemoryStore::new()
            .with_rows(
                Table::People,
                &[
                    Person::new(1, "Ada"),
                    Person::new(2, "Grace"),
                    Person::new(3, "Edsger"),
                ],
            )
            .unwrap()
    }

    #[tokio::test]
    async fn lookup_issues_one_deduplicated_query() {
        let store = people_store();
        let index = lookup(
            &store,
            TableQuery::new(Table::People),
            "people_id",
            &[2, 1, 2, 2, 9],
            |p: &Person| p.people_id,
        )
        .await
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index[&1].name.as_deref(), Some("Ada"));
        assert_eq!(store.request_count(Table::People), 1);
        let requests = store.requests();
        assert_eq!(
            requests[0].filters,
            vec![Filter::In {
                column: "people_id".to_string(),
                values: vec!["2".to_string(), "1".to_string(), "9".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn empty_keys_skip_the_store() {
        let store = people_store();
        let rows: Vec<Person> = fetch_in(&store, TableQuery::new(Table::People), "people_id", &[])
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert!(store.requests().is_empty());
    }

    #[test]
    fn index_by_keeps_first_row_per_key() {
        let index = index_by(vec![(1, "first"), (2, "other"), (1, "second")], |row| row.0);
        assert_eq!(index[&1].1, "first");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn merge_keeps_left_order_and_can_drop_rows() {
        let index = index_by(vec![(10, "ten"), (30, "thirty")], |row| row.0);
        let left = vec![30, 20, 10];

        let all = merge(left.clone(), &index, |k| Some(*k), |k, m| Some((k, m.map(|r| r.1))));
        assert_eq!(all, vec![(30, Some("thirty")), (20, None), (10, Some("ten"))]);

        let resolved = merge(left, &index, |k| Some(*k), |k, m| m.map(|r| (k, r.1)));
        assert_eq!(resolved, vec![(30, "thirty"), (10, "ten")]);
    }

    #[test]
    fn merge_passes_none_for_rows_without_key() {
        let index = index_by(vec![(1, "one")], |row| row.0);
        let merged = merge(vec![1, 2], &index, |k| (*k == 1).then_some(*k), |k, m| Some((k, m.is_some())));
        assert_eq!(merged, vec![(1, true), (2, false)]);
    }
}
