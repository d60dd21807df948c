//! Output formatting for CLI.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use anyhow::Result;
use parley_router::Routed;
use serde::Serialize;

use crate::{Cli, OutputFormat};

/// Text formatter honoring `--no-color`.
pub fn text_formatter(cli: &Cli) -> TextFormatter {
    TextFormatter::new(!cli.no_color)
}

/// Prints a routed result: the JSON envelope, or the rendered value
/// followed by the serving tier.
pub fn print_routed<T, F>(cli: &Cli, routed: &Routed<T>, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&TextFormatter, &T) -> String,
{
    match cli.format {
        OutputFormat::Text => {
            let formatter = text_formatter(cli);
            println!("{}", render(&formatter, &routed.value));
            if !cli.quiet {
                println!();
                println!("{}", formatter.format_served_by(routed));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_routed(routed)?);
        }
    }
    Ok(())
}
