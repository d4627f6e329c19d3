//! CLI subcommand implementations.

pub mod bill;
pub mod bills;
pub mod committee;
pub mod votes;

use anyhow::Result;
use billtracker_lib::{BillFilter, BillList, BillListSnapshot, FacetOptions, TableStore};

use crate::output::{print_bills, print_facets, OutputFormat};

/// Loads up to `pages` pages, stopping early after a short page.
pub async fn load_pages<S>(list: &BillList<S>, pages: usize) -> Result<BillListSnapshot>
where
    S: TableStore + ?Sized,
{
    list.load_initial().await?;
    for _ in 1..pages {
        if !list.snapshot().has_more {
            break;
        }
        list.load_more().await?;
    }
    Ok(list.snapshot())
}

/// Prints the loaded bills that pass `filter`, or the facet values of the whole set.
pub fn print_bill_list(
    snapshot: &BillListSnapshot,
    filter: &BillFilter,
    facets: bool,
    format: &OutputFormat,
) -> Result<()> {
    if facets {
        return print_facets(&FacetOptions::from_bills(&snapshot.items), format);
    }

    let visible = filter.apply(&snapshot.items);
    eprintln!(
        "Showing {} of {} loaded bills{}",
        visible.len(),
        snapshot.items.len(),
        if snapshot.has_more {
            " (more available, raise --pages)"
        } else {
            ""
        }
    );
    print_bills(&visible, format)
}
