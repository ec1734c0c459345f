//! Plain-text rendering of search results for the terminal.

use shared_types::{Lead, Source};

const MAX_CELL_WIDTH: usize = 36;

const TABLE_COLUMNS: [&str; 8] = [
    "Name",
    "Business Type",
    "Address",
    "Phone",
    "Website",
    "Email",
    "Employees",
    "Revenue",
];

fn table_row(lead: &Lead) -> [&str; 8] {
    [
        &lead.name,
        &lead.business_type,
        &lead.address,
        &lead.phone,
        &lead.website,
        &lead.email,
        &lead.employee_count,
        &lead.annual_revenue,
    ]
}

pub fn render_leads_table(leads: &[&Lead]) -> String {
    let rows: Vec<[String; 8]> = leads
        .iter()
        .map(|lead| table_row(lead).map(display_cell))
        .collect();

    let mut widths = TABLE_COLUMNS.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format!("Generated Leads ({})\n", leads.len()));
    output.push_str(&format_line(&TABLE_COLUMNS.map(String::from), &widths));
    output.push_str(&format_line(
        &widths.map(|width| "-".repeat(width)),
        &widths,
    ));
    for row in &rows {
        output.push_str(&format_line(row, &widths));
    }

    output
}

pub const NO_MATCHING_LEADS: &str =
    "No leads match the current filters. Try adjusting your filters.";

/// The table for a filtered view of `total` leads, or a hint when the filters exclude all of them.
pub fn render_filtered_table(view: &[&Lead], total: usize) -> String {
    if view.is_empty() && total > 0 {
        return format!("{}\n", NO_MATCHING_LEADS);
    }

    let mut output = render_leads_table(view);
    if view.len() < total {
        output.push_str(&format!("Showing {} of {} leads\n", view.len(), total));
    }
    output
}

pub fn render_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut output = String::from("Sources:\n");
    for (index, source) in sources.iter().enumerate() {
        output.push_str(&format!("  {}. {} - {}\n", index + 1, source.title, source.uri));
    }
    output
}

fn format_line(cells: &[String; 8], widths: &[usize; 8]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

/// Empty values render as "N/A"; long values are shortened with an ellipsis.
fn display_cell(value: &str) -> String {
    let value = value.replace(['\n', '\r'], " ");
    if value.is_empty() {
        return "N/A".to_string();
    }
    if value.chars().count() <= MAX_CELL_WIDTH {
        return value;
    }
    let shortened: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{}…", shortened)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_header_and_one_row_per_lead() {
        let a = Lead {
            name: "Sunrise Bakery".to_string(),
            website: "https://sunrise.example".to_string(),
            ..Default::default()
        };
        let b = Lead {
            name: "Crumb".to_string(),
            ..Default::default()
        };

        let table = render_leads_table(&[&a, &b]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Generated Leads (2)");
        assert!(lines[1].starts_with("Name           | Business Type"));
        assert!(lines[2].starts_with("---"));
        assert!(lines[3].starts_with("Sunrise Bakery | N/A"));
        assert!(lines[4].starts_with("Crumb          | N/A"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_filtered_view_reports_counts_or_hint() {
        let a = Lead {
            name: "Sunrise Bakery".to_string(),
            ..Default::default()
        };

        let partial = render_filtered_table(&[&a], 3);
        assert!(partial.starts_with("Generated Leads (1)\n"));
        assert!(partial.ends_with("Showing 1 of 3 leads\n"));

        assert_eq!(render_filtered_table(&[], 3), format!("{}\n", NO_MATCHING_LEADS));

        let full = render_filtered_table(&[&a], 1);
        assert!(!full.contains("Showing"));
    }

    #[test]
    fn test_long_and_multiline_cells_are_flattened() {
        let long = "x".repeat(100);
        let cell = display_cell(&long);
        assert_eq!(cell.chars().count(), MAX_CELL_WIDTH);
        assert!(cell.ends_with('…'));

        assert_eq!(display_cell("Suite 4\nAustin"), "Suite 4 Austin");
    }

    #[test]
    fn test_sources_are_numbered() {
        let sources = vec![
            Source {
                uri: "https://a.example".to_string(),
                title: "A".to_string(),
            },
            Source {
                uri: "https://b.example".to_string(),
                title: "B".to_string(),
            },
        ];

        let rendered = render_sources(&sources);
        assert_eq!(
            rendered,
            "Sources:\n  1. A - https://a.example\n  2. B - https://b.example\n"
        );
        assert_eq!(render_sources(&[]), "");
    }
}
