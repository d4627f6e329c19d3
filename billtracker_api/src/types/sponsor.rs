//! Bill sponsorship rows from the `Sponsors` table.

use serde::{Deserialize, Serialize};

use super::{BillID, PeopleID};

/// Sponsor position of the primary sponsor. Higher positions are co-sponsors.
pub const PRIMARY_SPONSOR_POSITION: i64 = 1;

/// Links a bill to one of its sponsors.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sponsor {
    pub bill_id: BillID,
    pub people_id: PeopleID,

    /// 1 for the primary sponsor, 2.. for co-sponsors in listing order.
    #[serde(default)]
    pub position: Option<i64>,
}

impl Sponsor {
    pub fn is_primary(&self) -> bool {
        self.position == Some(PRIMARY_SPONSOR_POSITION)
    }
}
