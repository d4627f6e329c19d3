use anyhow::Result;
use billtracker_lib::details::fetch_votes;
use billtracker_lib::validation;
use billtracker_lib::Client;
use clap::Args;

use crate::output::{print_votes, OutputFormat};

#[derive(Args)]
pub struct VotesArgs {
    /// Roll call id
    pub roll_call_id: i64,
}

pub async fn run(args: &VotesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let roll_call_id = validation::validate_id("rollcall", args.roll_call_id)?;
    let votes = fetch_votes(client, roll_call_id).await?;
    eprintln!("{} votes on roll call {}", votes.len(), roll_call_id);
    print_votes(&votes, format)
}
