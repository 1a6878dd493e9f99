//! CLI logic for the `textvis` binary.
//!
//! Reads text from an argument, a file or stdin, runs it through the
//! pipeline and writes the HTML document (or a JSON response) out.

mod args;
mod config;

pub use args::Args;
pub use config::{load_config, ConfigError, LOCAL_CONFIG};

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use log::info;
use thiserror::Error;

use crate::service::handle_json;
use crate::{generate, VisualError, VisualRequest};

/// Errors surfaced by the binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Visual(#[from] VisualError),
}

/// Run the CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File or stream I/O errors
/// - Configuration loading errors
/// - An unrecognized visual type (HTML mode only; JSON mode reports it in
///   the response)
pub fn run(args: &Args) -> Result<(), CliError> {
    let mut options = load_config(args.config.as_ref())?;
    if args.no_redact {
        options.redact = false;
    }

    let input = read_input(args.input.as_deref())?;
    info!(bytes = input.len(), json = args.json; "Read input");

    let output = if args.json {
        let response = handle_json(&input, &options);
        let mut body = serde_json::to_string_pretty(&response)?;
        body.push('\n');
        body
    } else {
        let request = VisualRequest::new(input).with_type(args.visual_type.as_str());
        let doc = generate(&request, &options)?;
        if doc.truncated {
            eprintln!("Note: the input was too large to draw in full; some items were left out.");
        }
        doc.html
    };

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path.as_str(); "Document written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Resolve the input: an existing file path, literal text (with `\n`
/// escapes expanded) or stdin
fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some(arg) if Path::new(arg).is_file() => Ok(fs::read_to_string(arg)?),
        Some(arg) => Ok(arg.replace("\\n", "\n")),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
