//! Roll-call votes and the individual ballots cast in them.

use serde::{Deserialize, Serialize};

use super::{BillID, PeopleID};

/// Unique identifier for a roll call.
pub type RollCallID = i64;

/// A recorded vote event on a bill, with aggregate counts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Rollcall {
    pub roll_call_id: RollCallID,

    #[serde(default)]
    pub bill_id: Option<BillID>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub chamber: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub yea: Option<i64>,

    // The hosted schema stores these three counts as text.
    #[serde(default)]
    pub nay: Option<String>,

    #[serde(default)]
    pub nv: Option<String>,

    #[serde(default)]
    pub absent: Option<String>,

    #[serde(default)]
    pub total: Option<i64>,
}

/// A single legislator's ballot in a roll call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vote {
    pub people_id: PeopleID,
    pub roll_call_id: RollCallID,

    /// Numeric vote code.
    #[serde(default)]
    pub vote: Option<i64>,

    /// Vote text, e.g. "Yea", "Nay", "NV", "Absent".
    #[serde(default)]
    pub vote_desc: Option<String>,
}
