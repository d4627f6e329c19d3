use std::sync::Arc;

use anyhow::Result;
use billtracker_lib::validation;
use billtracker_lib::{BillFilter, BillList, BillListConfig, Client};
use clap::Args;

use crate::commands::{load_pages, print_bill_list};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct BillsArgs {
    /// Search bill numbers and titles (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status (e.g. Passed, Pending)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by committee name (exact)
    #[arg(long)]
    pub committee: Option<String>,

    /// Filter by primary sponsor name
    #[arg(long)]
    pub sponsor: Option<String>,

    /// Filter by status month, YYYY-MM (e.g. 2024-03)
    #[arg(long)]
    pub month: Option<String>,

    /// Number of pages of 300 bills to load
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// List the available filter values instead of bills
    #[arg(long)]
    pub facets: bool,
}

pub fn build_filter(args: &BillsArgs) -> Result<BillFilter> {
    let mut filter = BillFilter::new();
    if let Some(ref search) = args.search {
        filter = filter.with_search(&validation::validate_search(search)?);
    }
    if let Some(ref status) = args.status {
        filter = filter.with_status(&validation::validate_status(status)?);
    }
    if let Some(ref committee) = args.committee {
        filter = filter.with_committee(&validation::validate_committee(committee)?);
    }
    if let Some(ref sponsor) = args.sponsor {
        filter = filter.with_sponsor(&validation::validate_sponsor(sponsor)?);
    }
    if let Some(ref month) = args.month {
        filter = filter.with_month(&validation::validate_month(month)?);
    }
    Ok(filter)
}

pub async fn run(args: &BillsArgs, client: Arc<Client>, format: &OutputFormat) -> Result<()> {
    let filter = build_filter(args)?;
    let pages = validation::validate_pages(args.pages)?;

    let list = BillList::new(client, BillListConfig::all_bills());
    let snapshot = load_pages(&list, pages).await?;
    print_bill_list(&snapshot, &filter, args.facets, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BillsArgs {
        BillsArgs {
            search: None,
            status: None,
            committee: None,
            sponsor: None,
            month: None,
            pages: 1,
            facets: false,
        }
    }

    #[test]
    fn no_flags_build_an_empty_filter() {
        assert!(build_filter(&args()).unwrap().is_empty());
    }

    #[test]
    fn flags_are_sanitized_into_the_filter() {
        let filter = build_filter(&BillsArgs {
            search: Some("  finance ".to_string()),
            sponsor: Some("Alice Moreno\n".to_string()),
            month: Some("2024-3".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(filter.search.as_deref(), Some("finance"));
        assert_eq!(filter.sponsor.as_deref(), Some("Alice Moreno"));
        assert_eq!(filter.month.as_deref(), Some("2024-03"));
    }

    #[test]
    fn bad_month_is_rejected() {
        let result = build_filter(&BillsArgs {
            month: Some("March".to_string()),
            ..args()
        });
        assert!(result.is_err());
    }
}
