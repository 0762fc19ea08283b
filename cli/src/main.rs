use clap::{Parser, Subcommand};
use log::LevelFilter;

mod decode;
mod error;
mod key;
mod output;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "revdec")]
#[command(about = "Revocation entry decoder", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Overrides RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode revocation log lines into issuer and serial
    Decode {
        #[command(flatten)]
        config: decode::Config,
    },
    /// Decode base64 cert_storage revocation keys
    Key {
        #[command(flatten)]
        config: key::Config,
    },
}

fn init_logger(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Decode { config } => {
            decode::execute(config)?;
        }
        Commands::Key { config } => {
            key::execute(config)?;
        }
    }

    Ok(())
}
