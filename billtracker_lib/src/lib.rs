//! Library layer for billtracker: paginated bill lists, client-side
//! filtering, and the bill detail view.
//!
//! Everything reads through the [`TableStore`] seam, implemented by the REST
//! client of the `billtracker_api` crate and by [`InMemoryStore`].

pub mod bills;
pub mod config;
pub mod details;
pub mod error;
pub mod filter;
pub mod join;
pub mod model;
pub mod store;
pub mod validation;

pub use billtracker_api;
pub use billtracker_api::types;
pub use billtracker_api::{Client, Query, SortDirection, Table, TableQuery};

pub use bills::{BillList, BillListConfig, BillListSnapshot, BillSortBy, ListPhase, LoadOutcome};
pub use config::StoreConfig;
pub use details::{BillDetailSnapshot, BillDetails, DetailOutcome};
pub use error::BillTrackerError;
pub use filter::{BillFilter, FacetOptions, FilterField};
pub use model::{BillWithSponsor, SponsorWithPerson, VoteWithPerson};
pub use store::{InMemoryStore, TableStore};
