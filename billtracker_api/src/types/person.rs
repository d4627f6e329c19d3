//! Legislator rows from the `People` table.

use serde::{Deserialize, Serialize};

/// Unique identifier for a legislator.
pub type PeopleID = i64;

/// A legislator as stored in the `People` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub people_id: PeopleID,

    /// Full display name.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub middle_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub suffix: Option<String>,

    #[serde(default)]
    pub nickname: Option<String>,

    /// Party abbreviation, e.g. "D" or "R".
    #[serde(default)]
    pub party: Option<String>,

    #[serde(default)]
    pub party_id: Option<i64>,

    /// Role abbreviation, e.g. "Rep" or "Sen".
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub role_id: Option<i64>,

    #[serde(default)]
    pub district: Option<String>,

    #[serde(default)]
    pub committee_id: Option<String>,

    #[serde(default)]
    pub ballotpedia: Option<String>,

    #[serde(default)]
    pub opensecrets_id: Option<String>,

    #[serde(default)]
    pub votesmart_id: Option<i64>,

    #[serde(default)]
    pub followthemoney_eid: Option<i64>,

    #[serde(default)]
    pub knowwho_pid: Option<i64>,
}

impl Person {
    /// Creates a person with an identifier and display name.
    pub fn new(people_id: PeopleID, name: &str) -> Self {
        Self {
            people_id,
            name: Some(name.to_string()),
            first_name: None,
            middle_name: None,
            last_name: None,
            suffix: None,
            nickname: None,
            party: None,
            party_id: None,
            role: None,
            role_id: None,
            district: None,
            committee_id: None,
            ballotpedia: None,
            opensecrets_id: None,
            votesmart_id: None,
            followthemoney_eid: None,
            knowwho_pid: None,
        }
    }

    /// The display name, falling back to first and last name.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
