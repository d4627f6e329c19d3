//! Detail view of a single bill: sponsors, history, rollcalls and the votes
//! of a selected rollcall.

use std::sync::{Arc, Mutex, MutexGuard};

use billtracker_api::types::{BillID, History, Person, RollCallID, Rollcall, Sponsor, Vote};
use billtracker_api::{Query, SortDirection, Table, TableQuery};
use serde::Serialize;

use crate::error::BillTrackerError;
use crate::join::{lookup, merge};
use crate::model::{SponsorWithPerson, VoteWithPerson};
use crate::store::{select_as, TableStore};

/// All sponsors of a bill in position order, joined to their legislators.
/// Sponsors whose legislator cannot be resolved are dropped.
pub async fn fetch_sponsors<S>(
    store: &S,
    bill_id: BillID,
) -> Result<Vec<SponsorWithPerson>, BillTrackerError>
where
    S: TableStore + ?Sized,
{
    let query = TableQuery::new(Table::Sponsors)
        .with_eq("bill_id", bill_id)
        .with_order_by("position");
    let sponsors: Vec<Sponsor> = select_as(store, &query).await?;
    let people_ids: Vec<i64> = sponsors.iter().map(|s| s.people_id).collect();
    let people = lookup(
        store,
        TableQuery::new(Table::People),
        "people_id",
        &people_ids,
        |p: &Person| p.people_id,
    )
    .await?;
    Ok(merge(
        sponsors,
        &people,
        |s| Some(s.people_id),
        |sponsor, person| {
            person.map(|p| SponsorWithPerson {
                sponsor,
                person: p.clone(),
            })
        },
    ))
}

/// The bill's history in sequence order.
pub async fn fetch_history<S>(store: &S, bill_id: BillID) -> Result<Vec<History>, BillTrackerError>
where
    S: TableStore + ?Sized,
{
    let query = TableQuery::new(Table::History)
        .with_eq("bill_id", bill_id)
        .with_order_by("sequence");
    select_as(store, &query).await
}

/// The bill's rollcalls, most recent first.
pub async fn fetch_rollcalls<S>(
    store: &S,
    bill_id: BillID,
) -> Result<Vec<Rollcall>, BillTrackerError>
where
    S: TableStore + ?Sized,
{
    let query = TableQuery::new(Table::Rollcalls)
        .with_eq("bill_id", bill_id)
        .with_order_by("date")
        .with_sort_direction(SortDirection::Desc);
    select_as(store, &query).await
}

/// Every ballot of a rollcall, joined to the voter with one batched lookup.
/// Ballots whose voter cannot be resolved are dropped.
pub async fn fetch_votes<S>(
    store: &S,
    roll_call_id: RollCallID,
) -> Result<Vec<VoteWithPerson>, BillTrackerError>
where
    S: TableStore + ?Sized,
{
    let query = TableQuery::new(Table::Votes).with_eq("roll_call_id", roll_call_id);
    let votes: Vec<Vote> = select_as(store, &query).await?;
    let people_ids: Vec<i64> = votes.iter().map(|v| v.people_id).collect();
    let people = lookup(
        store,
        TableQuery::new(Table::People),
        "people_id",
        &people_ids,
        |p: &Person| p.people_id,
    )
    .await?;
    let resolved = merge(
        votes,
        &people,
        |v| Some(v.people_id),
        |vote, person| {
            if person.is_none() {
                tracing::debug!("Dropping vote by unknown legislator {}", vote.people_id);
            }
            person.map(|p| VoteWithPerson {
                vote,
                person: p.clone(),
            })
        },
    );
    tracing::debug!("Resolved {} votes for rollcall {}", resolved.len(), roll_call_id);
    Ok(resolved)
}

/// Immutable view of a [`BillDetails`].
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct BillDetailSnapshot {
    /// The open bill, if any.
    pub bill_id: Option<BillID>,
    pub sponsors: Vec<SponsorWithPerson>,
    pub history: Vec<History>,
    pub rollcalls: Vec<Rollcall>,
    /// Votes of `selected_rollcall`.
    pub votes: Vec<VoteWithPerson>,
    pub selected_rollcall: Option<RollCallID>,
    /// True while the sections of the open bill are loading.
    pub loading: bool,
    /// True while the votes of the selected rollcall are loading.
    pub loading_votes: bool,
}

/// Result of a detail request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The response was applied to the view.
    Applied,
    /// A newer request replaced this one; its response was discarded.
    Stale,
    /// The selected rollcall was deselected without a fetch.
    Closed,
}

#[derive(Default)]
struct DetailState {
    snapshot: BillDetailSnapshot,
    generation: u64,
    vote_generation: u64,
}

/// Loads and holds the detail view of one bill at a time.
pub struct BillDetails<S: TableStore + ?Sized> {
    store: Arc<S>,
    state: Mutex<DetailState>,
}

impl<S: TableStore + ?Sized> BillDetails<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: Mutex::new(DetailState::default()),
        }
    }

    /// A copy of the current detail state.
    pub fn snapshot(&self) -> BillDetailSnapshot {
        self.state().snapshot.clone()
    }

    fn state(&self) -> MutexGuard<'_, DetailState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens `bill_id`, loading its sponsors, history and rollcalls together.
    ///
    /// The previous bill's sections, votes and rollcall selection are cleared
    /// first. A section that fails to load is left empty.
    pub async fn open(&self, bill_id: BillID) -> DetailOutcome {
        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.vote_generation += 1;
            state.snapshot = BillDetailSnapshot {
                bill_id: Some(bill_id),
                loading: true,
                ..Default::default()
            };
            state.generation
        };

        let store = self.store.as_ref();
        let (sponsors, history, rollcalls) = tokio::join!(
            fetch_sponsors(store, bill_id),
            fetch_history(store, bill_id),
            fetch_rollcalls(store, bill_id),
        );

        let mut state = self.state();
        if state.generation != generation {
            tracing::debug!("Discarding details of bill {}", bill_id);
            return DetailOutcome::Stale;
        }
        state.snapshot.sponsors = or_empty("sponsors", bill_id, sponsors);
        state.snapshot.history = or_empty("history", bill_id, history);
        state.snapshot.rollcalls = or_empty("rollcalls", bill_id, rollcalls);
        state.snapshot.loading = false;
        DetailOutcome::Applied
    }

    /// Selects `roll_call_id` and loads its votes, replacing any previous list.
    pub async fn load_votes(&self, roll_call_id: RollCallID) -> DetailOutcome {
        let tag = {
            let mut state = self.state();
            state.vote_generation += 1;
            state.snapshot.selected_rollcall = Some(roll_call_id);
            state.snapshot.votes.clear();
            state.snapshot.loading_votes = true;
            (state.generation, state.vote_generation)
        };

        let votes = fetch_votes(self.store.as_ref(), roll_call_id).await;

        let mut state = self.state();
        if (state.generation, state.vote_generation) != tag {
            tracing::debug!("Discarding votes of rollcall {}", roll_call_id);
            return DetailOutcome::Stale;
        }
        state.snapshot.votes = or_empty("votes", roll_call_id, votes);
        state.snapshot.loading_votes = false;
        DetailOutcome::Applied
    }

    /// Selects a rollcall, or deselects it if it is already selected.
    pub async fn toggle_rollcall(&self, roll_call_id: RollCallID) -> DetailOutcome {
        {
            let mut state = self.state();
            if state.snapshot.selected_rollcall == Some(roll_call_id) {
                state.vote_generation += 1;
                state.snapshot.selected_rollcall = None;
                state.snapshot.votes.clear();
                state.snapshot.loading_votes = false;
                return DetailOutcome::Closed;
            }
        }
        self.load_votes(roll_call_id).await
    }
}

fn or_empty<T>(section: &str, id: i64, result: Result<Vec<T>, BillTrackerError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("Failed to load {} for {}: {}", section, id, e);
            Vec::new()
        }
    }
}
