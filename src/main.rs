use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Session { yes, no } => {
            let cfg = commands::bootstrap(&args.config)?;
            commands::session::execute(cfg, commands::session::ConfirmMode::from_flags(yes, no))
                .await?;
        }
        cli::Commands::Benchmark {
            service,
            zip,
            upgrade,
        } => {
            let cfg = commands::bootstrap(&args.config)?;
            commands::benchmark::execute(cfg, &service, &zip, upgrade).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Version => {
            println!("PricePoint v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
