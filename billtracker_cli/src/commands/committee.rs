use std::sync::Arc;

use anyhow::Result;
use billtracker_lib::validation;
use billtracker_lib::{BillFilter, BillList, BillListConfig, Client};
use clap::Args;

use crate::commands::{load_pages, print_bill_list};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct CommitteeArgs {
    /// Committee name, exactly as stored (e.g. "Finance")
    pub name: String,

    /// Search bill numbers and titles (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status (e.g. Passed, Pending)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by status month, YYYY-MM (e.g. 2024-03)
    #[arg(long)]
    pub month: Option<String>,

    /// Number of pages of 100 bills to load
    #[arg(long, default_value = "1")]
    pub pages: usize,

    /// List the available filter values instead of bills
    #[arg(long)]
    pub facets: bool,
}

pub async fn run(args: &CommitteeArgs, client: Arc<Client>, format: &OutputFormat) -> Result<()> {
    let committee = validation::validate_committee(&args.name)?;
    let pages = validation::validate_pages(args.pages)?;

    let mut filter = BillFilter::new();
    if let Some(ref search) = args.search {
        filter = filter.with_search(&validation::validate_search(search)?);
    }
    if let Some(ref status) = args.status {
        filter = filter.with_status(&validation::validate_status(status)?);
    }
    if let Some(ref month) = args.month {
        filter = filter.with_month(&validation::validate_month(month)?);
    }

    let list = BillList::new(client, BillListConfig::for_committee(&committee));
    let snapshot = load_pages(&list, pages).await?;
    eprintln!("Committee: {}", committee);
    print_bill_list(&snapshot, &filter, args.facets, format)
}
