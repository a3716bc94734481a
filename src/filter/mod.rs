//! Filter box parsing
//!
//! The problems panel filter box accepts free text. A recognised severity
//! keyword at the start of the text restricts the results to that severity;
//! whatever follows the keyword is matched as plain text.
//!
//! # Syntax
//!
//! ```text
//! text                 Markers whose message or resource contains "text"
//! errors               Error markers only
//! errors text          Error markers containing "text"
//! WARNINGS text        Keywords match case-insensitively
//! infos                Info markers only
//! ```
//!
//! The keywords themselves are localized strings, see [`FilterKeywords`].

pub mod keywords;
pub mod options;

pub use keywords::FilterKeywords;
pub use options::FilterOptions;
