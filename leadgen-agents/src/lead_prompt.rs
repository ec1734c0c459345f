use shared_types::{SearchParams, LEAD_FIELD_NAMES};

pub fn build_lead_prompt(params: &SearchParams) -> String {
    format!(
        r#"Find up to {count} local businesses for the niche '{niche}' in '{city}, {country}'.
For each business, find the following details: name, full address, phone number, website URL, a publicly available contact email, business type (e.g., "Restaurant", "Retail"), an estimated number of employees, and an estimated annual revenue.

Your entire response MUST be ONLY a valid JSON array of objects inside a ```json markdown block.
Do not include any text or explanation before or after the JSON block.

Each JSON object must have these exact keys: {keys}.
If a piece of information is not available, return an empty string "" for that value. Do not invent data.

Example:
```json
[
  {{
    "name": "Example Coffee Roasters",
    "address": "123 Main St, San Francisco, USA",
    "phone": "+1-555-123-4567",
    "website": "https://www.example.com",
    "email": "contact@example.com",
    "businessType": "Coffee Shop",
    "employeeCount": "10-20",
    "annualRevenue": "~$500k"
  }}
]
```"#,
        count = params.number_of_leads,
        niche = params.niche.trim(),
        city = params.city.trim(),
        country = params.country.trim(),
        keys = format_field_names(),
    )
}

fn format_field_names() -> String {
    LEAD_FIELD_NAMES
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ")
}
