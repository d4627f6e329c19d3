use anyhow::Result;
use billtracker_lib::types::{parse_date, History, Rollcall};
use billtracker_lib::{BillWithSponsor, FacetOptions, SponsorWithPerson, VoteWithPerson};
use chrono::NaiveDate;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

/// Visual weight of a status or vote label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    Default,
    Secondary,
    Destructive,
}
impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Badge::Default => "default",
                Badge::Secondary => "secondary",
                Badge::Destructive => "destructive",
            }
        )
    }
}

/// Label and badge for a bill status. A missing status reads as pending.
pub fn status_badge(status: Option<&str>) -> (String, Badge) {
    let label = status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Pending");
    let badge = match label.to_lowercase().as_str() {
        "passed" => Badge::Default,
        "pending" => Badge::Secondary,
        "failed" => Badge::Destructive,
        _ => Badge::Secondary,
    };
    (label.to_string(), badge)
}

pub fn vote_badge(vote: &str) -> Badge {
    match vote {
        "Yea" => Badge::Default,
        "Nay" => Badge::Destructive,
        _ => Badge::Secondary,
    }
}

/// `MM/DD/YYYY`, or "No date" when missing or unparseable.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| "No date".to_string())
}

/// `2024-03` as "March 2024". Unparseable keys are returned unchanged.
pub fn format_month(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[derive(Tabled, Serialize)]
struct BillRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    bill_id: i64,
    #[tabled(rename = "Number")]
    #[serde(rename = "Number")]
    number: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Badge")]
    #[serde(rename = "Badge")]
    badge: String,
    #[tabled(rename = "Committee")]
    #[serde(rename = "Committee")]
    committee: String,
    #[tabled(rename = "Sponsor")]
    #[serde(rename = "Sponsor")]
    sponsor: String,
    #[tabled(rename = "Status Date")]
    #[serde(rename = "Status Date")]
    status_date: String,
}

#[derive(Tabled, Serialize)]
struct SponsorRow {
    #[tabled(rename = "Position")]
    #[serde(rename = "Position")]
    position: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
}

#[derive(Tabled, Serialize)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "Action")]
    #[serde(rename = "Action")]
    action: String,
}

#[derive(Tabled, Serialize)]
struct RollcallRow {
    #[tabled(rename = "Roll Call")]
    #[serde(rename = "Roll Call")]
    roll_call_id: i64,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Chamber")]
    #[serde(rename = "Chamber")]
    chamber: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Yea")]
    #[serde(rename = "Yea")]
    yea: String,
    #[tabled(rename = "Nay")]
    #[serde(rename = "Nay")]
    nay: String,
    #[tabled(rename = "NV")]
    #[serde(rename = "NV")]
    nv: String,
    #[tabled(rename = "Absent")]
    #[serde(rename = "Absent")]
    absent: String,
}

#[derive(Tabled, Serialize)]
struct VoteRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
    #[tabled(rename = "Vote")]
    #[serde(rename = "Vote")]
    vote: String,
    #[tabled(rename = "Badge")]
    #[serde(rename = "Badge")]
    badge: String,
}

#[derive(Tabled, Serialize)]
struct FacetRow {
    #[tabled(rename = "Filter")]
    #[serde(rename = "Filter")]
    filter: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_bill_rows(bills: &[&BillWithSponsor]) -> Vec<BillRow> {
    bills
        .iter()
        .map(|b| {
            let (status, badge) = status_badge(b.bill.status_desc.as_deref());
            BillRow {
                bill_id: b.bill.bill_id,
                number: or_dash(b.bill.bill_number.as_deref()),
                title: b
                    .bill
                    .title
                    .clone()
                    .unwrap_or_else(|| "No title available".to_string()),
                status,
                badge: badge.to_string(),
                committee: or_dash(b.bill.committee.as_deref()),
                sponsor: b
                    .primary_sponsor
                    .as_ref()
                    .map(|p| p.display_name())
                    .unwrap_or_else(|| "-".to_string()),
                status_date: format_date(b.bill.status_date.as_deref()),
            }
        })
        .collect()
}

fn build_overview_rows(bill: &BillWithSponsor) -> Vec<FieldRow> {
    let (status, _) = status_badge(bill.bill.status_desc.as_deref());
    let b = &bill.bill;
    [
        ("Number", or_dash(b.bill_number.as_deref())),
        (
            "Title",
            b.title
                .clone()
                .unwrap_or_else(|| "No title available".to_string()),
        ),
        ("Description", or_dash(b.description.as_deref())),
        ("Status", status),
        ("Status Date", format_date(b.status_date.as_deref())),
        ("Committee", or_dash(b.committee.as_deref())),
        (
            "Primary Sponsor",
            bill.primary_sponsor
                .as_ref()
                .map(|p| p.display_name())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Last Action", or_dash(b.last_action.as_deref())),
        ("Last Action Date", format_date(b.last_action_date.as_deref())),
        ("State Link", or_dash(b.state_link.as_deref())),
    ]
    .into_iter()
    .map(|(field, value)| FieldRow {
        field: field.to_string(),
        value,
    })
    .collect()
}

fn build_sponsor_rows(sponsors: &[SponsorWithPerson]) -> Vec<SponsorRow> {
    sponsors
        .iter()
        .map(|s| SponsorRow {
            position: s
                .sponsor
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            name: s.person.display_name(),
            party: or_dash(s.person.party.as_deref()),
            district: or_dash(s.person.district.as_deref()),
        })
        .collect()
}

fn build_history_rows(history: &[History]) -> Vec<HistoryRow> {
    history
        .iter()
        .map(|h| HistoryRow {
            date: format_date(Some(&h.date)),
            chamber: or_dash(h.chamber.as_deref()),
            action: or_dash(h.action.as_deref()),
        })
        .collect()
}

fn build_rollcall_rows(rollcalls: &[Rollcall]) -> Vec<RollcallRow> {
    rollcalls
        .iter()
        .map(|r| RollcallRow {
            roll_call_id: r.roll_call_id,
            date: format_date(r.date.as_deref()),
            chamber: or_dash(r.chamber.as_deref()),
            description: or_dash(r.description.as_deref()),
            yea: r.yea.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            nay: or_dash(r.nay.as_deref()),
            nv: or_dash(r.nv.as_deref()),
            absent: or_dash(r.absent.as_deref()),
        })
        .collect()
}

fn build_vote_rows(votes: &[VoteWithPerson]) -> Vec<VoteRow> {
    votes
        .iter()
        .map(|v| {
            let vote = v.vote.vote_desc.clone().unwrap_or_else(|| "-".to_string());
            VoteRow {
                name: v.person.display_name(),
                party: or_dash(v.person.party.as_deref()),
                district: or_dash(v.person.district.as_deref()),
                badge: vote_badge(&vote).to_string(),
                vote,
            }
        })
        .collect()
}

fn build_facet_rows(facets: &FacetOptions) -> Vec<FacetRow> {
    let plain = |filter: &str, values: &[String]| -> Vec<FacetRow> {
        values
            .iter()
            .map(|v| FacetRow {
                filter: filter.to_string(),
                value: v.clone(),
                label: v.clone(),
            })
            .collect()
    };
    let mut rows = plain("status", facets.statuses.as_slice());
    rows.extend(plain("committee", facets.committees.as_slice()));
    rows.extend(plain("sponsor", facets.sponsors.as_slice()));
    rows.extend(facets.months.iter().map(|m| FacetRow {
        filter: "month".to_string(),
        value: m.clone(),
        label: format_month(m),
    }));
    rows
}

// -- Rendering --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

/// Prints a section heading before a table. Skipped for CSV, where sections are
/// separated by a blank line instead.
fn print_heading(title: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Csv => println!(),
        OutputFormat::Markdown => println!("\n## {}\n", title),
        _ => println!("\n{}", title),
    }
}

pub fn print_bills(bills: &[&BillWithSponsor], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&bills);
            Ok(())
        }
        _ => print_rows(build_bill_rows(bills), format),
    }
}

pub fn print_facets(facets: &FacetOptions, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(facets);
            Ok(())
        }
        _ => print_rows(build_facet_rows(facets), format),
    }
}

pub fn print_votes(votes: &[VoteWithPerson], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&votes);
            Ok(())
        }
        _ => print_rows(build_vote_rows(votes), format),
    }
}

/// Overview followed by each detail section that has rows.
pub fn print_bill_detail(
    bill: &BillWithSponsor,
    sponsors: &[SponsorWithPerson],
    history: &[History],
    rollcalls: &[Rollcall],
    votes: Option<&[VoteWithPerson]>,
    format: &OutputFormat,
) -> Result<()> {
    print_rows(build_overview_rows(bill), format)?;
    print_heading("Sponsors", format);
    print_rows(build_sponsor_rows(sponsors), format)?;
    print_heading("History", format);
    print_rows(build_history_rows(history), format)?;
    print_heading("Roll Calls", format);
    print_rows(build_rollcall_rows(rollcalls), format)?;
    if let Some(votes) = votes {
        print_heading("Votes", format);
        print_rows(build_vote_rows(votes), format)?;
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
