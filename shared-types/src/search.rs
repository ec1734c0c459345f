use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Parameters of one lead search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct SearchParams {
    pub niche: String,
    pub city: String,
    pub country: String,
    /// Upper bound on the number of leads requested, never below 1.
    pub number_of_leads: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            niche: "coffee shops".to_string(),
            city: "San Francisco".to_string(),
            country: "USA".to_string(),
            number_of_leads: 10,
        }
    }
}

impl SearchParams {
    pub fn new(
        niche: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        number_of_leads: u32,
    ) -> Self {
        Self {
            niche: niche.into(),
            city: city.into(),
            country: country.into(),
            number_of_leads: clamp_lead_count(number_of_leads),
        }
    }

    pub fn set_number_of_leads(&mut self, number_of_leads: u32) {
        self.number_of_leads = clamp_lead_count(number_of_leads);
    }

    /// Names of the free-text fields that are blank.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("niche", &self.niche),
            ("city", &self.city),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

pub fn clamp_lead_count(number_of_leads: u32) -> u32 {
    number_of_leads.max(1)
}

/// Soft, user-visible outcome of a search that is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum SearchNotice {
    NoResultsFound,
}

impl SearchNotice {
    pub fn message(&self) -> &'static str {
        match self {
            SearchNotice::NoResultsFound => "No leads found. Try broadening your search criteria.",
        }
    }
}

impl std::fmt::Display for SearchNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
