use std::fs::File;

use anyhow::Context;
use tokio::sync::mpsc;

mod bank;
mod cli;
mod report;

use cli::{Args, Report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    cli::init_logging();

    let (sender, receiver) = mpsc::channel(args.channel_size);
    let mut teller = bank::Teller::new(receiver);

    let handle = tokio::spawn(async move {
        teller.run().await;
        teller
    });

    let input = File::open(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    for command in bank::read_commands(input) {
        sender.send(command).await?;
    }

    drop(sender); // Close the sender to signal no more commands will be sent
    let bank = handle
        .await
        .context("failed to join the teller task")?
        .into_bank();

    let stdout = std::io::stdout();
    match args.report {
        Report::Accounts => report::write_accounts(stdout, &bank)?,
        Report::Customers => report::write_customers(stdout, &bank)?,
    }
    Ok(())
}
