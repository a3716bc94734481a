use crate::filter::FilterOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkersError {
    #[error("Failed to read markers file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse markers file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Ignore,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Ignore => "ignore",
        };
        write!(f, "{}", label)
    }
}

/// A single problem reported against a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub resource: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default = "default_position")]
    pub line: u32,
    #[serde(default = "default_position")]
    pub column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_position() -> u32 {
    1
}

impl Marker {
    pub fn new(resource: &str, severity: Severity, message: &str) -> Self {
        Self {
            resource: resource.to_string(),
            severity,
            message: message.to_string(),
            line: default_position(),
            column: default_position(),
            source: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Whether the marker passes the filter.
    ///
    /// Severity flags combine with OR; with no flag set every severity passes.
    /// The residual text must occur, ignoring case, in the message, the
    /// resource or the source.
    pub fn matches(&self, options: &FilterOptions) -> bool {
        if options.has_severity_filter() {
            let wanted = match self.severity {
                Severity::Error => options.filter_errors(),
                Severity::Warning => options.filter_warnings(),
                Severity::Info => options.filter_infos(),
                Severity::Ignore => false,
            };
            if !wanted {
                return false;
            }
        }

        let needle = options.filter_value();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.message.to_lowercase().contains(&needle)
            || self.resource.to_lowercase().contains(&needle)
            || self
                .source
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkerStats {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub unknowns: usize,
}

impl MarkerStats {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos + self.unknowns
    }
}

/// The markers shown in the panel together with the active filter.
#[derive(Debug, Clone, Default)]
pub struct MarkersModel {
    markers: Vec<Marker>,
    filter_options: FilterOptions,
}

impl MarkersModel {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self {
            markers,
            filter_options: FilterOptions::default(),
        }
    }

    /// Replace the active filter.
    pub fn update(&mut self, options: FilterOptions) {
        self.filter_options = options;
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    /// Markers passing the active filter, grouped by resource in first-seen
    /// order and then by line and column.
    pub fn filtered_markers(&self) -> Vec<&Marker> {
        let mut ranks: HashMap<&str, usize> = HashMap::new();
        for marker in &self.markers {
            let next = ranks.len();
            ranks.entry(marker.resource.as_str()).or_insert(next);
        }

        let mut filtered: Vec<&Marker> = self
            .markers
            .iter()
            .filter(|m| m.matches(&self.filter_options))
            .collect();
        filtered.sort_by_key(|m| {
            let rank = ranks.get(m.resource.as_str()).copied().unwrap_or(usize::MAX);
            (rank, m.line, m.column)
        });
        filtered
    }

    pub fn stats(&self) -> MarkerStats {
        let mut stats = MarkerStats::default();
        for marker in &self.markers {
            match marker.severity {
                Severity::Error => stats.errors += 1,
                Severity::Warning => stats.warnings += 1,
                Severity::Info => stats.infos += 1,
                Severity::Ignore => stats.unknowns += 1,
            }
        }
        stats
    }
}

pub fn load_markers_from_path(path: &Path) -> Result<Vec<Marker>, MarkersError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| MarkersError::Read {
        path: path_display.clone(),
        source,
    })?;

    serde_json::from_str::<Vec<Marker>>(&raw).map_err(|source| MarkersError::Parse {
        path: path_display,
        source,
    })
}
