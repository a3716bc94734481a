use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Filter a problems list the way the problems panel filter box does.
///
/// Every line read from stdin is taken as the new content of the filter box;
/// the filtered problems are printed after each one.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file containing an array of markers
    #[arg(short, long, env = "MARKERS_FILE")]
    pub markers: PathBuf,

    /// JSON5 file with localized filter messages (keywords, placeholder)
    #[arg(long, env = "MARKERS_MESSAGES")]
    pub messages: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Only print matching problems, no summary lines
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    /// One JSON document per refresh, one per line
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
