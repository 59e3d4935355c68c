//! Output rendering for CLI results.

use crate::cli::args::{OutputFormat, SentiraArgs};
use crate::error::Result;
use crate::evaluate::SearchReport;

/// Print a search report in the requested format.
pub fn print_report(args: &SentiraArgs, report: &SearchReport) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{report}");
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
