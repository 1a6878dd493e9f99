//! Command-line argument definitions.
//!
//! [`Args`] is parsed with [`clap`]. Arguments select the input source, the
//! visual type, where the document goes and how much gets logged.

use clap::Parser;

/// Turn plain text into a flowchart, diagram or chart (self-contained HTML)
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Text to visualize, or a path to a file holding it. Reads stdin when omitted
    pub input: Option<String>,

    /// Visual type: auto, flowchart, diagram or chart
    #[arg(short = 't', long = "type", default_value = "auto")]
    pub visual_type: String,

    /// Path to the output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Read a JSON request and write a JSON response instead of HTML
    #[arg(long)]
    pub json: bool,

    /// Leave secrets in the text unmasked
    #[arg(long)]
    pub no_redact: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
