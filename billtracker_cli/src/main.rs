mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use billtracker_lib::config::{KEY_VAR, URL_VAR};
use billtracker_lib::StoreConfig;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "billtracker")]
#[command(about = "Browse legislative bills, sponsors, history and roll call votes")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Project URL (overrides BILLTRACKER_SUPABASE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// API key (overrides BILLTRACKER_SUPABASE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bills, most recent status first
    Bills(commands::bills::BillsArgs),
    /// List the bills of one committee
    Committee(commands::committee::CommitteeArgs),
    /// Show a bill with its sponsors, history and roll calls
    Bill(commands::bill::BillArgs),
    /// List the votes of a roll call
    Votes(commands::votes::VotesArgs),
}

fn parse_format(value: &str) -> OutputFormat {
    match value {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    }
}

/// Environment configuration with `--url`/`--key` taking precedence.
fn store_config(cli: &Cli) -> Result<StoreConfig> {
    let config = StoreConfig::from_lookup(|name| match name {
        URL_VAR if cli.url.is_some() => cli.url.clone(),
        KEY_VAR if cli.key.is_some() => cli.key.clone(),
        _ => std::env::var(name).ok(),
    })?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("billtracker=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = parse_format(&cli.output);
    let client = Arc::new(store_config(&cli)?.client());

    match &cli.command {
        Commands::Bills(args) => commands::bills::run(args, client, &format).await?,
        Commands::Committee(args) => commands::committee::run(args, client, &format).await?,
        Commands::Bill(args) => commands::bill::run(args, client, &format).await?,
        Commands::Votes(args) => commands::votes::run(args, &client, &format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_formats() {
        assert_eq!(parse_format("json"), OutputFormat::Json);
        assert_eq!(parse_format("csv"), OutputFormat::Csv);
        assert_eq!(parse_format("md"), OutputFormat::Markdown);
        assert_eq!(parse_format("xml"), OutputFormat::Table);
    }

    #[test]
    fn parses_bills_flags() {
        let cli = Cli::try_parse_from([
            "billtracker",
            "--output",
            "json",
            "bills",
            "--status",
            "Passed",
            "--pages",
            "2",
            "--facets",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        match cli.command {
            Commands::Bills(args) => {
                assert_eq!(args.status.as_deref(), Some("Passed"));
                assert_eq!(args.pages, 2);
                assert!(args.facets);
            }
            _ => panic!("expected bills"),
        }
    }

    #[test]
    fn parses_bill_with_votes() {
        let cli = Cli::try_parse_from(["billtracker", "bill", "2", "--votes", "42"]).unwrap();
        match cli.command {
            Commands::Bill(args) => {
                assert_eq!(args.id, 2);
                assert_eq!(args.votes, Some(42));
            }
            _ => panic!("expected bill"),
        }
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from([
            "billtracker",
            "--url",
            "https://abc.supabase.co",
            "--key",
            "anon-key",
            "votes",
            "42",
        ])
        .unwrap();
        let config = store_config(&cli).unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.api_key, "anon-key");
    }

    #[test]
    fn committee_requires_a_name() {
        assert!(Cli::try_parse_from(["billtracker", "committee"]).is_err());
    }
}
