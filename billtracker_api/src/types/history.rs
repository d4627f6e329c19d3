use serde::{Deserialize, Serialize};

use super::BillID;

/// One action in a bill's legislative history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct History {
    pub bill_id: BillID,

    /// Position of this action in the bill's history; defines display order.
    pub sequence: i64,

    pub date: String,

    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub chamber: Option<String>,
}
