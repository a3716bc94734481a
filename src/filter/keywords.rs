use crate::config::{
    ConfigError, ERRORS_PREFIX_KEY, INFOS_PREFIX_KEY, Messages, WARNINGS_PREFIX_KEY,
};

/// The three severity keywords recognised at the start of the filter text.
///
/// Keywords are stored lower-cased so matching against user input is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKeywords {
    errors: String,
    warnings: String,
    infos: String,
}

impl Default for FilterKeywords {
    fn default() -> Self {
        Self::new("errors", "warnings", "infos")
    }
}

impl FilterKeywords {
    pub fn new(errors: &str, warnings: &str, infos: &str) -> Self {
        Self {
            errors: errors.to_lowercase(),
            warnings: warnings.to_lowercase(),
            infos: infos.to_lowercase(),
        }
    }

    /// Resolve the keywords from a message bundle. Blank keywords are rejected.
    pub fn resolve(messages: &Messages) -> Result<Self, ConfigError> {
        Ok(Self::new(
            required_keyword(messages, ERRORS_PREFIX_KEY)?,
            required_keyword(messages, WARNINGS_PREFIX_KEY)?,
            required_keyword(messages, INFOS_PREFIX_KEY)?,
        ))
    }

    pub fn errors(&self) -> &str {
        &self.errors
    }

    pub fn warnings(&self) -> &str {
        &self.warnings
    }

    pub fn infos(&self) -> &str {
        &self.infos
    }
}

// an empty keyword would prefix every input
fn required_keyword<'a>(messages: &'a Messages, key: &str) -> Result<&'a str, ConfigError> {
    match messages.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::EmptyKeyword(key.to_string())),
    }
}

/// Byte length of the prefix of `text` that spells `keyword` when lower-cased.
///
/// The length is measured on `text` itself, so slicing `text` at the returned
/// offset always lands on a char boundary even when lower-casing changes the
/// UTF-8 width of a character.
pub(crate) fn keyword_prefix_len(text: &str, keyword: &str) -> Option<usize> {
    let mut expected = keyword.chars().peekable();

    for (idx, ch) in text.char_indices() {
        if expected.peek().is_none() {
            return Some(idx);
        }
        for lower in ch.to_lowercase() {
            match expected.next() {
                Some(k) if k == lower => {}
                Some(_) => return None,
                // keyword ended inside a multi-char lowercase expansion
                None => return Some(idx + ch.len_utf8()),
            }
        }
    }

    expected.peek().is_none().then_some(text.len())
}
