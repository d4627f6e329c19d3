//! Joined views built in memory from several tables. Never persisted.

use billtracker_api::types::{Bill, Person, Sponsor, Vote};
use serde::{Deserialize, Serialize};

/// A bill with its primary sponsor resolved, if there is one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BillWithSponsor {
    #[serde(flatten)]
    pub bill: Bill,
    pub primary_sponsor: Option<Person>,
}

impl BillWithSponsor {
    /// Name of the primary sponsor, if resolved and named.
    pub fn sponsor_name(&self) -> Option<&str> {
        self.primary_sponsor.as_ref().and_then(|p| p.name.as_deref())
    }
}

/// A sponsorship row joined to the sponsoring legislator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SponsorWithPerson {
    #[serde(flatten)]
    pub sponsor: Sponsor,
    pub person: Person,
}

/// A ballot joined to the legislator who cast it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VoteWithPerson {
    #[serde(flatten)]
    pub vote: Vote,
    pub person: Person,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_with_sponsor_serializes_flat() {
        let mut bill = Bill::new(7);
        bill.bill_number = Some("HB 7".to_string());
        let joined = BillWithSponsor {
            bill,
            primary_sponsor: Some(Person::new(3, "Alice Moreno")),
        };
        let value = serde_json::to_value(&joined).unwrap();
        assert_eq!(value["bill_id"], 7);
        assert_eq!(value["bill_number"], "HB 7");
        assert_eq!(value["primary_sponsor"]["name"], "Alice Moreno");
        assert_eq!(joined.sponsor_name(), Some("Alice Moreno"));
    }

    #[test]
    fn missing_sponsor_serializes_as_null() {
        let joined = BillWithSponsor {
            bill: Bill::new(8),
            primary_sponsor: None,
        };
        let value = serde_json::to_value(&joined).unwrap();
        assert!(value["primary_sponsor"].is_null());
        assert_eq!(joined.sponsor_name(), None);
    }
}
