use crate::model::{Marker, MarkersModel, Severity};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write as _;

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.to_string());
    match severity {
        Severity::Error => cell.fg(Color::Red),
        Severity::Warning => cell.fg(Color::Yellow),
        Severity::Info => cell.fg(Color::Blue),
        Severity::Ignore => cell,
    }
}

pub fn format_markers_table(markers: &[&Marker]) -> Table {
    let mut table = create_styled_table(&["Severity", "Resource", "Position", "Message", "Source"]);
    for marker in markers {
        table.add_row(vec![
            severity_cell(marker.severity),
            Cell::new(&marker.resource),
            Cell::new(format!("{}:{}", marker.line, marker.column)),
            Cell::new(&marker.message),
            Cell::new(marker.source.as_deref().unwrap_or("")),
        ]);
    }
    table
}

/// One-line description of the active filter and how much of the model it shows.
pub fn format_summary(model: &MarkersModel, shown: usize) -> String {
    let options = model.filter_options();
    let stats = model.stats();
    let mut out = String::new();

    let _ = write!(
        out,
        "Showing {} of {} problems ({} errors, {} warnings, {} infos)",
        shown.to_string().bold(),
        stats.total(),
        stats.errors.to_string().red(),
        stats.warnings.to_string().yellow(),
        stats.infos.to_string().blue()
    );

    if !options.is_empty() {
        let mut severities = Vec::new();
        if options.filter_errors() {
            severities.push("errors");
        }
        if options.filter_warnings() {
            severities.push("warnings");
        }
        if options.filter_infos() {
            severities.push("infos");
        }
        let _ = write!(out, " | filter:");
        if !severities.is_empty() {
            let _ = write!(out, " severity={}", severities.join(","));
        }
        if !options.filter_value().is_empty() {
            let _ = write!(out, " text={:?}", options.filter_value());
        }
    }

    out
}

/// Text rendering of the panel after a refresh.
pub fn format_panel_text(model: &MarkersModel, quiet: bool) -> String {
    let filtered = model.filtered_markers();
    let mut out = String::new();

    if !quiet {
        let _ = writeln!(out, "{}", format_summary(model, filtered.len()));
    }
    if filtered.is_empty() {
        if !quiet {
            let _ = writeln!(out, "{}", "No problems match the filter.".dimmed());
        }
        return out;
    }
    let _ = writeln!(out, "{}", format_markers_table(&filtered));
    out
}

pub fn format_panel_json(model: &MarkersModel) -> String {
    let filtered = model.filtered_markers();
    serde_json::to_string(&json!({
        "filter": model.filter_options(),
        "stats": model.stats(),
        "count": filtered.len(),
        "markers": filtered,
    }))
    .unwrap_or_else(|_| "{\"error\":\"failed to serialize panel output\"}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterKeywords, FilterOptions};

    fn sample_model() -> MarkersModel {
        MarkersModel::new(vec![
            Marker::new("src/a.rs", Severity::Error, "mismatched types"),
            Marker::new("src/b.rs", Severity::Warning, "unused variable"),
        ])
    }

    #[test]
    fn test_summary_mentions_active_filter() {
        colored::control::set_override(false);
        let mut model = sample_model();
        model.update(FilterOptions::parse("errors types", &FilterKeywords::default()));

        let summary = format_summary(&model, 1);
        assert!(summary.starts_with("Showing 1 of 2 problems"), "{}", summary);
        assert!(summary.contains("severity=errors"));
        assert!(summary.contains("text=\"types\""));
    }

    #[test]
    fn test_json_lists_filtered_markers() {
        let mut model = sample_model();
        model.update(FilterOptions::parse("unused", &FilterKeywords::default()));

        let value: serde_json::Value = serde_json::from_str(&format_panel_json(&model)).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["markers"][0]["resource"], "src/b.rs");
        assert_eq!(value["filter"]["filter_value"], "unused");
    }
}
