use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod error;
pub mod filter;
pub mod lead;
pub mod search;

pub use error::LeadGenError;
pub use filter::{LeadFilter, Presence};
pub use lead::{Lead, LeadSearchResult, Source, LEAD_COLUMN_TITLES, LEAD_FIELD_NAMES};
pub use search::{clamp_lead_count, SearchNotice, SearchParams};

/// Error payload for machine-readable output
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&LeadGenError> for ErrorResponse {
    fn from(err: &LeadGenError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }
}

/// Search results together with the soft notice, if any
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct LeadSearchResponse {
    pub params: SearchParams,
    pub filter: LeadFilter,
    pub leads: Vec<Lead>,
    pub sources: Vec<Source>,
    pub notice: Option<SearchNotice>,
}
