use std::io::{self, Write};

use revocation::{Report, ReportEntry};
use serde::Serialize;

use crate::error::Result;

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// One rendered line per input line
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

pub(crate) fn print_reports<T>(reports: &[Report<T>], format: OutputFormat) -> Result<()>
where
    T: ReportEntry + Serialize,
{
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for report in reports {
                writeln!(stdout, "{report}")?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reports)?;
            writeln!(stdout, "{json}")?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(reports)?;
            write!(stdout, "{yaml}")?;
        }
    }
    Ok(())
}
