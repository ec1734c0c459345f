use serde_json::Value;
use shared_types::{Lead, LeadGenError, LEAD_FIELD_NAMES};

/// Maps a parsed JSON array onto leads, one lead per element.
///
/// Only the outer shape can fail. Missing or falsy fields become empty strings and
/// elements that are not objects become empty leads, so list positions are preserved.
pub fn normalize_leads(value: &Value) -> Result<Vec<Lead>, LeadGenError> {
    let items = value.as_array().ok_or(LeadGenError::UnexpectedShape)?;
    Ok(items.iter().map(normalize_lead).collect())
}

pub fn normalize_lead(item: &Value) -> Lead {
    let mut lead = Lead::default();

    let Some(object) = item.as_object() else {
        return lead;
    };

    for key in LEAD_FIELD_NAMES {
        if let (Some(slot), Some(raw)) = (lead.field_mut(key), object.get(key)) {
            *slot = field_text(raw);
        }
    }

    lead
}

/// Falsy values (`null`, `false`, `0`, `""`) become empty; everything else keeps its text.
fn field_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
