//! Extractors Crate
//!
//! Turns raw model output into typed leads and typed leads into export formats.
//!
//! # Pipeline
//!
//! - `response`: finds and parses the JSON payload inside the model's text
//! - `normalize`: maps the parsed array onto `Lead` records with empty-string defaults
//! - `csv_export`: writes a (filtered) list of leads as CSV
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{normalize_leads, ResponseExtractor};
//!
//! let value = ResponseExtractor::with_defaults().extract(&response_text)?;
//! let leads = normalize_leads(&value)?;
//! ```

pub mod csv_export;
pub mod normalize;
pub mod response;

pub use csv_export::{ExportError, LeadCsvExporter, DEFAULT_EXPORT_FILE_NAME};
pub use normalize::{normalize_lead, normalize_leads};
pub use response::{
    BracketedArray, ExtractionStrategy, FencedJsonBlock, ResponseExtractor, StrategyFailure,
    WholeText,
};
