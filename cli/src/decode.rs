use clap::Args;
use log::info;

use crate::error::Result;
use crate::output::{OutputFormat, print_reports};
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the revocation log. If not specified, reads from stdin
    file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;

    let reports = revocation::decode_batch(&input);
    let decoded = reports.iter().filter(|r| r.is_decoded()).count();
    info!("decoded {decoded} of {} entries", reports.len());

    print_reports(&reports, config.output)
}
