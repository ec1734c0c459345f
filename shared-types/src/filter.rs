use crate::Lead;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

/// Tri-state filter on whether a field is filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    #[default]
    All,
    Yes,
    No,
}

impl Presence {
    pub fn admits(&self, present: bool) -> bool {
        match self {
            Presence::All => true,
            Presence::Yes => present,
            Presence::No => !present,
        }
    }
}

impl FromStr for Presence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Presence::All),
            "yes" => Ok(Presence::Yes),
            "no" => Ok(Presence::No),
            other => Err(format!(
                "invalid presence filter '{}', expected one of: all, yes, no",
                other
            )),
        }
    }
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Presence::All => write!(f, "all"),
            Presence::Yes => write!(f, "yes"),
            Presence::No => write!(f, "no"),
        }
    }
}

/// Client-side filter over a list of leads.
///
/// `city` and `country` are case-insensitive substring matches against the lead's address;
/// an empty string places no constraint. All four predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
pub struct LeadFilter {
    pub city: String,
    pub country: String,
    pub website: Presence,
    pub email: Presence,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        let address = lead.address.to_lowercase();
        let city_match = self.city.is_empty() || address.contains(&self.city.to_lowercase());
        let country_match =
            self.country.is_empty() || address.contains(&self.country.to_lowercase());

        city_match
            && country_match
            && self.website.admits(lead.has_website())
            && self.email.admits(lead.has_email())
    }

    /// Order-preserving view of the leads that pass the filter.
    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }
}
