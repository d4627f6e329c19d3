//! Bill rows from the `Bills` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::{month_key, parse_date};

/// Unique identifier for a bill.
pub type BillID = i64;

/// A bill as stored in the `Bills` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Bill {
    pub bill_id: BillID,

    /// Chamber-prefixed number, e.g. "HB 1234".
    #[serde(default)]
    pub bill_number: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Name of the committee the bill is referred to.
    #[serde(default)]
    pub committee: Option<String>,

    #[serde(default)]
    pub committee_id: Option<String>,

    /// Numeric status code.
    #[serde(default)]
    pub status: Option<i64>,

    /// Human-readable status, e.g. "Passed".
    #[serde(default)]
    pub status_desc: Option<String>,

    /// Date of the last status change, as returned by the store.
    #[serde(default)]
    pub status_date: Option<String>,

    #[serde(default)]
    pub last_action: Option<String>,

    #[serde(default)]
    pub last_action_date: Option<String>,

    #[serde(default)]
    pub session_id: Option<i64>,

    #[serde(default)]
    pub state_link: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

impl Bill {
    /// Creates a bill with only its identifier set.
    pub fn new(bill_id: BillID) -> Self {
        Self {
            bill_id,
            bill_number: None,
            title: None,
            description: None,
            committee: None,
            committee_id: None,
            status: None,
            status_desc: None,
            status_date: None,
            last_action: None,
            last_action_date: None,
            session_id: None,
            state_link: None,
            url: None,
        }
    }

    /// The parsed status date. Missing or malformed dates are `None`.
    pub fn status_day(&self) -> Option<NaiveDate> {
        self.status_date.as_deref().and_then(parse_date)
    }

    /// The `YYYY-MM` month of the status date.
    pub fn status_month(&self) -> Option<String> {
        self.status_date.as_deref().and_then(month_key)
    }
}
