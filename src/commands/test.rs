use anyhow::Result;
use colored::Colorize;
use pricepoint::{config, logging::describe_api_key};
use std::path::Path;
use tracing::info;

/// Execute the test command
///
/// This validates the configuration without contacting the provider
pub fn execute(path: &Path) -> Result<()> {
    println!("{}", "Testing configuration...".yellow());

    // Load configuration (this will validate it)
    let cfg = super::bootstrap(path)?;
    info!("Configuration validated");

    // Print success message
    println!("{}", "✓ Configuration test successful".green());
    println!();

    // Print summary
    println!("{}", "Configuration Summary:".bold());
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("  {}: {}", "File".cyan(), source);
    println!("  {}: {}", "Log Level".cyan(), cfg.logging.level);
    println!("  {}: {}", "Log Format".cyan(), cfg.logging.format);
    println!();

    println!("{}", "Provider:".cyan());
    println!("    Base URL: {}", cfg.provider.base_url);
    println!("    Model: {}", cfg.provider.model);
    println!(
        "    API Key: {}",
        describe_api_key(cfg.provider.api_key.as_deref())
    );
    match cfg.provider.timeout_seconds {
        Some(secs) => println!("    Timeout: {}s", secs),
        None => println!("    Timeout: {}", "transport default".dimmed()),
    }
    if cfg.provider.api_key.is_none() {
        println!(
            "    {}",
            "No API key set; every fetch will use fallback data".yellow()
        );
    }
    println!();

    println!("{}", "Calculator Defaults:".cyan());
    println!("    Labor Cost: {}", cfg.calculator.labor_cost);
    println!("    Supplies: {}", cfg.calculator.supplies_cost);
    println!("    Overhead: {}%", cfg.calculator.overhead_percent);

    Ok(())
}
