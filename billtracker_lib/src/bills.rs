//! Paginated bill list with primary sponsors resolved.
//!
//! A [`BillList`] owns the loaded bills and the paging cursor. Pages are
//! fetched on demand with [`BillList::load_initial`] and
//! [`BillList::load_more`]; readers take a [`BillListSnapshot`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use billtracker_api::types::{Bill, BillID, Person, Sponsor, PRIMARY_SPONSOR_POSITION};
use billtracker_api::{Query, SortDirection, Table, TableQuery};

use crate::error::BillTrackerError;
use crate::join::{fetch_in, index_by, lookup, merge};
use crate::model::BillWithSponsor;
use crate::store::{select_as, TableStore};

/// Page size of the all-bills list.
pub const ALL_BILLS_PAGE_SIZE: usize = 300;

/// Page size of a committee's bill list.
pub const COMMITTEE_PAGE_SIZE: usize = 100;

/// Column a bill list is ordered by. Always descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillSortBy {
    StatusDate,
    BillId,
}
impl std::fmt::Display for BillSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BillSortBy::StatusDate => "status_date",
                BillSortBy::BillId => "bill_id",
            }
        )
    }
}

/// What a [`BillList`] loads and how it pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillListConfig {
    pub sort_by: BillSortBy,
    pub page_size: usize,
    /// Restricts the list to bills referred to this committee.
    pub committee: Option<String>,
    /// Asks the store for `position = 1` sponsor rows only.
    pub primary_sponsors_only: bool,
}

impl Default for BillListConfig {
    fn default() -> Self {
        Self::all_bills()
    }
}

impl BillListConfig {
    /// Every bill, most recent status first.
    pub fn all_bills() -> Self {
        Self {
            sort_by: BillSortBy::StatusDate,
            page_size: ALL_BILLS_PAGE_SIZE,
            committee: None,
            primary_sponsors_only: false,
        }
    }

    /// The bills of one committee, newest bill id first.
    pub fn for_committee(committee: &str) -> Self {
        Self {
            sort_by: BillSortBy::BillId,
            page_size: COMMITTEE_PAGE_SIZE,
            committee: Some(committee.to_string()),
            primary_sponsors_only: true,
        }
    }

    /// Overrides the page size. A page always holds at least one bill.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The `Bills` query for the page starting at `offset`.
    pub fn page_query(&self, offset: usize) -> TableQuery {
        let mut query = TableQuery::new(Table::Bills)
            .with_order_by(&self.sort_by.to_string())
            .with_sort_direction(SortDirection::Desc)
            .with_range(offset, offset + self.page_size.max(1) - 1);
        if let Some(committee) = &self.committee {
            query = query.with_eq("committee", committee);
        }
        query
    }

    fn sponsor_query(&self) -> TableQuery {
        let query = TableQuery::new(Table::Sponsors).with_columns(&["bill_id", "people_id", "position"]);
        if self.primary_sponsors_only {
            query.with_eq("position", PRIMARY_SPONSOR_POSITION)
        } else {
            query.with_order_by("position")
        }
    }
}

/// Where a list is in its load cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListPhase {
    #[default]
    Idle,
    InitialLoading,
    LoadingMore,
    Loaded,
    /// The last load failed; carries the error message.
    Failed(String),
}

impl ListPhase {
    fn is_busy(&self) -> bool {
        matches!(self, ListPhase::InitialLoading | ListPhase::LoadingMore)
    }
}

/// Immutable view of a [`BillList`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BillListSnapshot {
    /// Loaded bills in load order, unique by id.
    pub items: Vec<BillWithSponsor>,
    pub phase: ListPhase,
    /// Offset of the next page.
    pub offset: usize,
    /// False once a short page has been seen.
    pub has_more: bool,
}

impl BillListSnapshot {
    pub fn is_initial_loading(&self) -> bool {
        self.phase == ListPhase::InitialLoading
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == ListPhase::LoadingMore
    }

    /// Message of the last failed load, if the list is in the failed phase.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ListPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of a load request that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched. `added` excludes bills that were already loaded.
    Loaded { fetched: usize, added: usize },
    /// Another load was in flight or there was nothing more to load.
    Skipped,
    /// The response was superseded by a newer initial load and discarded.
    Stale,
}

#[derive(Default)]
struct ListState {
    snapshot: BillListSnapshot,
    ids: HashSet<BillID>,
    generation: u64,
}

impl ListState {
    /// Appends bills not loaded yet, returning how many were added.
    fn append(&mut self, page: Vec<BillWithSponsor>) -> usize {
        let mut added = 0;
        for bill in page {
            if self.ids.insert(bill.bill.bill_id) {
                self.snapshot.items.push(bill);
                added += 1;
            } else {
                tracing::warn!("Skipping bill {} already in the list", bill.bill.bill_id);
            }
        }
        added
    }
}

/// A paginated, de-duplicated list of bills backed by a [`TableStore`].
pub struct BillList<S: TableStore + ?Sized> {
    store: Arc<S>,
    config: BillListConfig,
    state: Mutex<ListState>,
}

impl<S: TableStore + ?Sized> BillList<S> {
    pub fn new(store: Arc<S>, config: BillListConfig) -> Self {
        Self {
            store,
            config,
            state: Mutex::new(ListState::default()),
        }
    }

    pub fn config(&self) -> &BillListConfig {
        &self.config
    }

    /// A copy of the current list state.
    pub fn snapshot(&self) -> BillListSnapshot {
        self.state().snapshot.clone()
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Loads the first page, replacing the list on success.
    ///
    /// Skipped while another initial load is in flight. A load-more still in
    /// flight is superseded and its response discarded.
    pub async fn load_initial(&self) -> Result<LoadOutcome, BillTrackerError> {
        let generation = {
            let mut state = self.state();
            if state.snapshot.is_initial_loading() {
                return Ok(LoadOutcome::Skipped);
            }
            state.generation += 1;
            state.snapshot.phase = ListPhase::InitialLoading;
            state.generation
        };

        let result = fetch_page(self.store.as_ref(), &self.config, 0).await;

        let mut state = self.state();
        if state.generation != generation {
            return Ok(LoadOutcome::Stale);
        }
        match result {
            Ok(page) => {
                let fetched = page.len();
                state.snapshot.items.clear();
                state.ids.clear();
                let added = state.append(page);
                state.snapshot.offset = if fetched == 0 { 0 } else { self.config.page_size };
                state.snapshot.has_more = fetched == self.config.page_size;
                state.snapshot.phase = ListPhase::Loaded;
                tracing::debug!("Loaded first page of {} bills", fetched);
                Ok(LoadOutcome::Loaded { fetched, added })
            }
            Err(e) => {
                tracing::error!("Failed to load bills: {}", e);
                state.snapshot.phase = ListPhase::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Loads the next page and appends it.
    ///
    /// Skipped while any load is in flight or after a short page.
    pub async fn load_more(&self) -> Result<LoadOutcome, BillTrackerError> {
        let (generation, offset) = {
            let mut state = self.state();
            if state.snapshot.phase.is_busy() || !state.snapshot.has_more {
                return Ok(LoadOutcome::Skipped);
            }
            state.snapshot.phase = ListPhase::LoadingMore;
            (state.generation, state.snapshot.offset)
        };

        let result = fetch_page(self.store.as_ref(), &self.config, offset).await;

        let mut state = self.state();
        if state.generation != generation {
            return Ok(LoadOutcome::Stale);
        }
        match result {
            Ok(page) => {
                let fetched = page.len();
                let added = state.append(page);
                if fetched > 0 {
                    state.snapshot.offset = offset + self.config.page_size;
                }
                state.snapshot.has_more = fetched == self.config.page_size;
                state.snapshot.phase = ListPhase::Loaded;
                tracing::debug!("Loaded {} more bills at offset {}", fetched, offset);
                Ok(LoadOutcome::Loaded { fetched, added })
            }
            Err(e) => {
                tracing::error!("Failed to load bills at offset {}: {}", offset, e);
                state.snapshot.phase = ListPhase::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

/// Fetches one page of bills and resolves their primary sponsors.
pub async fn fetch_page<S>(
    store: &S,
    config: &BillListConfig,
    offset: usize,
) -> Result<Vec<BillWithSponsor>, BillTrackerError>
where
    S: TableStore + ?Sized,
{
    let bills: Vec<Bill> = select_as(store, &config.page_query(offset)).await?;
    attach_primary_sponsors(store, config, bills).await
}

/// Resolves the primary sponsor of every bill with one `Sponsors` and one
/// `People` query. Bills without a resolvable primary sponsor get `None`.
pub async fn attach_primary_sponsors<S>(
    store: &S,
    config: &BillListConfig,
    bills: Vec<Bill>,
) -> Result<Vec<BillWithSponsor>, BillTrackerError>
where
    S: TableStore + ?Sized,
{
    let bill_ids: Vec<BillID> = bills.iter().map(|b| b.bill_id).collect();
    let sponsors: Vec<Sponsor> = fetch_in(store, config.sponsor_query(), "bill_id", &bill_ids).await?;
    let primary = index_by(
        sponsors.into_iter().filter(Sponsor::is_primary),
        |s| s.bill_id,
    );

    let people_ids: Vec<i64> = bills
        .iter()
        .filter_map(|b| primary.get(&b.bill_id))
        .map(|s| s.people_id)
        .collect();
    let people = lookup(
        store,
        TableQuery::new(Table::People),
        "people_id",
        &people_ids,
        |p: &Person| p.people_id,
    )
    .await?;

    Ok(merge(
        bills,
        &primary,
        |bill| Some(bill.bill_id),
        |bill, sponsor| {
            Some(BillWithSponsor {
                primary_sponsor: sponsor.and_then(|s| people.get(&s.people_id)).cloned(),
                bill,
            })
        },
    ))
}
