use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// JSON keys the model is asked to produce, in record order.
pub const LEAD_FIELD_NAMES: [&str; 8] = [
    "name",
    "address",
    "phone",
    "website",
    "email",
    "businessType",
    "employeeCount",
    "annualRevenue",
];

/// Column titles used when leads are exported, in record order.
pub const LEAD_COLUMN_TITLES: [&str; 8] = [
    "Name",
    "Address",
    "Phone",
    "Website",
    "Email",
    "Business Type",
    "Employee Count",
    "Annual Revenue",
];

/// A single business lead returned by the model.
///
/// Every field is free text and defaults to an empty string. `employee_count` and
/// `annual_revenue` hold whatever estimate the model produced ("10-20", "~$500k").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
pub struct Lead {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    pub business_type: String,
    pub employee_count: String,
    pub annual_revenue: String,
}

impl Lead {
    /// Field values in the same order as [`LEAD_FIELD_NAMES`].
    pub fn values(&self) -> [&str; 8] {
        [
            &self.name,
            &self.address,
            &self.phone,
            &self.website,
            &self.email,
            &self.business_type,
            &self.employee_count,
            &self.annual_revenue,
        ]
    }

    /// Mutable access to a field by its JSON key.
    pub fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "name" => Some(&mut self.name),
            "address" => Some(&mut self.address),
            "phone" => Some(&mut self.phone),
            "website" => Some(&mut self.website),
            "email" => Some(&mut self.email),
            "businessType" => Some(&mut self.business_type),
            "employeeCount" => Some(&mut self.employee_count),
            "annualRevenue" => Some(&mut self.annual_revenue),
            _ => None,
        }
    }

    pub fn has_website(&self) -> bool {
        !self.website.is_empty()
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// A web citation reported by the search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    /// Builds a source only when both the uri and the title are present.
    pub fn from_parts(uri: Option<&str>, title: Option<&str>) -> Option<Self> {
        match (uri, title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => Some(Self {
                uri: uri.to_string(),
                title: title.to_string(),
            }),
            _ => None,
        }
    }
}

/// Leads and sources produced by one search. Both are always replaced together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct LeadSearchResult {
    pub leads: Vec<Lead>,
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_uses_camel_case_keys() {
        let lead = Lead {
            name: "Sunrise Bakery".to_string(),
            business_type: "Bakery".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["businessType"], "Bakery");
        assert_eq!(json["employeeCount"], "");
        assert!(json.get("business_type").is_none());
    }

    #[test]
    fn test_lead_deserializes_missing_fields_as_empty() {
        let lead: Lead = serde_json::from_str(r#"{"name": "Only Name"}"#).unwrap();
        assert_eq!(lead.name, "Only Name");
        assert_eq!(lead.annual_revenue, "");
    }

    #[test]
    fn test_field_mut_covers_every_field_name() {
        let mut lead = Lead::default();
        for key in LEAD_FIELD_NAMES {
            *lead.field_mut(key).unwrap() = key.to_string();
        }
        assert_eq!(lead.values(), LEAD_FIELD_NAMES);
        assert!(lead.field_mut("unknown").is_none());
    }

    #[test]
    fn test_source_requires_uri_and_title() {
        assert!(Source::from_parts(Some("https://a.example"), Some("A")).is_some());
        assert!(Source::from_parts(Some("https://a.example"), None).is_none());
        assert!(Source::from_parts(None, Some("A")).is_none());
        assert!(Source::from_parts(Some(""), Some("A")).is_none());
    }
}
