//! Policy owners/beneficiaries CSV cleaner.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use policyholders_transform::logging::{init_logging, LogConfig};
use policyholders_transform::pipeline::TracingObserver;
use policyholders_transform::{convert_file, ConvertOptions};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "policyholders-transform",
    version,
    about = "Clean a CSV export of insurance policy owners and beneficiaries",
    long_about = "Clean a CSV export of insurance policy owners and beneficiaries.\n\n\
                  Normalizes names, e-mails, sex codes and NIFs, classifies phone numbers \
                  into mobile and landline, drops records without a name or mobile phone, \
                  and writes <USERS_FILE stem>_converted.<ext> next to the input."
)]
struct Cli {
    /// CSV export to transform.
    #[arg(value_name = "USERS_FILE")]
    users_file: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::default().with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    info!("using file {} as users file", cli.users_file.display());
    let options = ConvertOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..ConvertOptions::default()
    };

    match convert_file(&cli.users_file, &options) {
        Ok(summary) => {
            info!(
                rows_read = summary.rows_read,
                rows_written = summary.rows_written,
                output = %summary.output.display(),
                "conversion finished"
            );
        }
        Err(error) => {
            error!("{error}");
            std::process::exit(1);
        }
    }
}
