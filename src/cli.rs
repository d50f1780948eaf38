//! Command-line arguments and logging setup.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// The default size of the channel feeding the teller.
const DEFAULT_CHANNEL_SIZE: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Applies a batch of banking commands and prints the resulting ledger.")]
pub struct Args {
    /// CSV file of commands (op,customer,name,address,type,account,to,amount,rate,limit)
    pub input: PathBuf,

    /// Capacity of the command channel
    #[arg(long, default_value_t = DEFAULT_CHANNEL_SIZE)]
    pub channel_size: usize,

    /// Which report to print once every command has been applied
    #[arg(long, value_enum, default_value_t = Report::Accounts)]
    pub report: Report,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// One row per account, grouped by customer
    Accounts,
    /// One row per customer
    Customers,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Initialise logging to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, DEFAULT_CHANNEL_SIZE, Report};

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["bank-ledger", "commands.csv"]).unwrap();
        assert_eq!(args.input.to_str(), Some("commands.csv"));
        assert_eq!(args.channel_size, DEFAULT_CHANNEL_SIZE);
        assert_eq!(args.report, Report::Accounts);
    }

    #[test]
    fn test_customers_report() {
        let args = Args::try_parse_from([
            "bank-ledger",
            "--report",
            "customers",
            "--channel-size",
            "8",
            "commands.csv",
        ])
        .unwrap();
        assert_eq!(args.report, Report::Customers);
        assert_eq!(args.channel_size, 8);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["bank-ledger"]).is_err());
    }
}
