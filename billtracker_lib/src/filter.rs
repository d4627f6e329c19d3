//! Client-side filtering of a loaded bill set.
//!
//! Filtering never touches the store: it runs synchronously over bills
//! already in memory and is re-run whenever a predicate or the base set
//! changes. Facet options are always derived from the unfiltered set.

use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use serde::Serialize;

use crate::model::BillWithSponsor;

/// Filter value that means "no constraint" in select controls.
pub const ALL: &str = "all";

/// The filterable fields of a bill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Status,
    Committee,
    Sponsor,
    Month,
}
impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FilterField::Search => "search",
                FilterField::Status => "status",
                FilterField::Committee => "committee",
                FilterField::Sponsor => "sponsor",
                FilterField::Month => "month",
            }
        )
    }
}
impl FromStr for FilterField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(FilterField::Search),
            "status" => Ok(FilterField::Status),
            "committee" => Ok(FilterField::Committee),
            "sponsor" => Ok(FilterField::Sponsor),
            "month" => Ok(FilterField::Month),
            _ => Err(()),
        }
    }
}

/// A set of bill predicates, combined with AND. `None` means unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BillFilter {
    /// Case-insensitive substring of the bill number or title.
    pub search: Option<String>,
    /// Exact `status_desc`.
    pub status: Option<String>,
    /// Exact committee name.
    pub committee: Option<String>,
    /// Primary sponsor name, compared case-insensitively after trimming.
    pub sponsor: Option<String>,
    /// `YYYY-MM` month of the status date.
    pub month: Option<String>,
}

impl BillFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, search: &str) -> Self {
        self.with(FilterField::Search, search)
    }

    pub fn with_status(self, status: &str) -> Self {
        self.with(FilterField::Status, status)
    }

    pub fn with_committee(self, committee: &str) -> Self {
        self.with(FilterField::Committee, committee)
    }

    pub fn with_sponsor(self, sponsor: &str) -> Self {
        self.with(FilterField::Sponsor, sponsor)
    }

    pub fn with_month(self, month: &str) -> Self {
        self.with(FilterField::Month, month)
    }

    fn with(mut self, field: FilterField, value: &str) -> Self {
        self.set(field, value);
        self
    }

    /// Sets one predicate. An empty value clears it, as does `"all"` for
    /// every field except the free-text search.
    pub fn set(&mut self, field: FilterField, value: &str) {
        let cleared = value.is_empty() || (value == ALL && field != FilterField::Search);
        let value = if cleared {
            None
        } else {
            Some(value.to_string())
        };
        match field {
            FilterField::Search => self.search = value,
            FilterField::Status => self.status = value,
            FilterField::Committee => self.committee = value,
            FilterField::Sponsor => self.sponsor = value,
            FilterField::Month => self.month = value,
        }
    }

    /// Current value of one predicate.
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Search => self.search.as_deref(),
            FilterField::Status => self.status.as_deref(),
            FilterField::Committee => self.committee.as_deref(),
            FilterField::Sponsor => self.sponsor.as_deref(),
            FilterField::Month => self.month.as_deref(),
        }
    }

    /// Resets every predicate to unconstrained.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if `bill` satisfies every set predicate.
    pub fn matches(&self, bill: &BillWithSponsor) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = [bill.bill.bill_number.as_deref(), bill.bill.title.as_deref()]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if bill.bill.status_desc.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(committee) = &self.committee {
            if bill.bill.committee.as_deref() != Some(committee.as_str()) {
                return false;
            }
        }
        if let Some(sponsor) = &self.sponsor {
            let wanted = sponsor.trim().to_lowercase();
            match bill.sponsor_name() {
                Some(name) if name.trim().to_lowercase() == wanted => {}
                _ => return false,
            }
        }
        if let Some(month) = &self.month {
            if bill.bill.status_month().as_deref() != Some(month.as_str()) {
                return false;
            }
        }
        true
    }

    /// The bills matching every predicate, in their original order.
    pub fn apply<'a>(&self, bills: &'a [BillWithSponsor]) -> Vec<&'a BillWithSponsor> {
        bills.iter().filter(|bill| self.matches(bill)).collect()
    }
}

/// Distinct values available for each select control.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetOptions {
    /// Statuses in first-seen order.
    pub statuses: Vec<String>,
    /// Committees in first-seen order.
    pub committees: Vec<String>,
    /// Primary sponsor names, alphabetical.
    pub sponsors: Vec<String>,
    /// `YYYY-MM` months, most recent first.
    pub months: Vec<String>,
}

impl FacetOptions {
    /// Derives the options from the full, unfiltered bill set.
    pub fn from_bills(bills: &[BillWithSponsor]) -> Self {
        let statuses = distinct_in_order(bills.iter().filter_map(|b| b.bill.status_desc.as_deref()));
        let committees = distinct_in_order(bills.iter().filter_map(|b| b.bill.committee.as_deref()));
        let sponsors: BTreeSet<String> = bills
            .iter()
            .filter_map(|b| b.sponsor_name())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        let months: BTreeSet<String> = bills.iter().filter_map(|b| b.bill.status_month()).collect();
        Self {
            statuses,
            committees,
            sponsors: sponsors.into_iter().collect(),
            months: months.into_iter().rev().collect(),
        }
    }
}

fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
