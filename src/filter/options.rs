use super::keywords::{FilterKeywords, keyword_prefix_len};
use serde::Serialize;

/// The structured form of the filter box text.
///
/// Built fresh from the raw text on every change and never mutated
/// afterwards; fields are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    complete_value: String,
    filter_errors: bool,
    filter_warnings: bool,
    filter_infos: bool,
    filter_value: String,
}

impl FilterOptions {
    /// Parse the raw filter box text.
    ///
    /// The keywords are tested in order errors, warnings, infos. Every keyword
    /// that prefixes the text sets its flag, and the residual text starts
    /// after the last keyword that matched. With distinct keywords at most one
    /// can match; keywords sharing a prefix can set several flags at once.
    pub fn parse(raw: &str, keywords: &FilterKeywords) -> Self {
        let mut options = FilterOptions {
            complete_value: raw.to_string(),
            ..Default::default()
        };

        let filter = raw.trim();
        if filter.is_empty() {
            return options;
        }

        let mut start_index = 0;
        if let Some(len) = keyword_prefix_len(filter, keywords.errors()) {
            options.filter_errors = true;
            start_index = len;
        }
        if let Some(len) = keyword_prefix_len(filter, keywords.warnings()) {
            options.filter_warnings = true;
            start_index = len;
        }
        if let Some(len) = keyword_prefix_len(filter, keywords.infos()) {
            options.filter_infos = true;
            start_index = len;
        }

        options.filter_value = filter[start_index..].trim().to_string();
        options
    }

    /// The text exactly as typed.
    pub fn complete_value(&self) -> &str {
        &self.complete_value
    }

    pub fn filter_errors(&self) -> bool {
        self.filter_errors
    }

    pub fn filter_warnings(&self) -> bool {
        self.filter_warnings
    }

    pub fn filter_infos(&self) -> bool {
        self.filter_infos
    }

    /// Residual text after the severity keyword, trimmed.
    pub fn filter_value(&self) -> &str {
        &self.filter_value
    }

    pub fn has_severity_filter(&self) -> bool {
        self.filter_errors || self.filter_warnings || self.filter_infos
    }

    /// True when the options let every marker through.
    pub fn is_empty(&self) -> bool {
        !self.has_severity_filter() && self.filter_value.is_empty()
    }
}
