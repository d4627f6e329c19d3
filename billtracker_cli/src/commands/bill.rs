use std::sync::Arc;

use anyhow::{bail, Result};
use billtracker_lib::bills::attach_primary_sponsors;
use billtracker_lib::store::select_as;
use billtracker_lib::types::Bill;
use billtracker_lib::validation;
use billtracker_lib::{
    BillDetailSnapshot, BillDetails, BillListConfig, BillWithSponsor, Client, Table, TableQuery,
};
use clap::Args;
use serde::Serialize;

use crate::output::{print_bill_detail, print_json, OutputFormat};

#[derive(Args)]
pub struct BillArgs {
    /// Bill id
    pub id: i64,

    /// Also list the votes of this roll call
    #[arg(long)]
    pub votes: Option<i64>,
}

#[derive(Serialize)]
struct BillReport<'a> {
    bill: &'a BillWithSponsor,
    #[serde(flatten)]
    details: &'a BillDetailSnapshot,
}

pub async fn run(args: &BillArgs, client: Arc<Client>, format: &OutputFormat) -> Result<()> {
    let bill_id = validation::validate_id("bill", args.id)?;
    let roll_call_id = args
        .votes
        .map(|id| validation::validate_id("rollcall", id))
        .transpose()?;

    let query = TableQuery::new(Table::Bills).with_eq("bill_id", bill_id);
    let bills: Vec<Bill> = select_as(client.as_ref(), &query).await?;
    if bills.is_empty() {
        bail!("bill {} not found", bill_id);
    }
    let mut joined =
        attach_primary_sponsors(client.as_ref(), &BillListConfig::all_bills(), bills).await?;
    let bill = joined.remove(0);

    let details = BillDetails::new(client);
    details.open(bill_id).await;
    if let Some(roll_call_id) = roll_call_id {
        details.load_votes(roll_call_id).await;
    }
    let snapshot = details.snapshot();

    match format {
        OutputFormat::Json => print_json(&BillReport {
            bill: &bill,
            details: &snapshot,
        }),
        _ => print_bill_detail(
            &bill,
            &snapshot.sponsors,
            &snapshot.history,
            &snapshot.rollcalls,
            roll_call_id.map(|_| snapshot.votes.as_slice()),
            format,
        )?,
    }
    Ok(())
}
