use anyhow::Result;
use colored::Colorize;
use pricepoint::{
    config::Config,
    search::SearchForm,
    tier::{AlwaysConfirm, AlwaysDecline, Confirmer},
    view::ViewState,
};

/// Execute the benchmark command
///
/// Runs one Landing -> Loading -> Dashboard cycle and prints the Dashboard
pub async fn execute(cfg: Config, service: &str, zip: &str, upgrade: bool) -> Result<()> {
    let mut form = SearchForm::default();
    form.set_service(service);
    form.set_zip(zip);
    if !form.can_submit() {
        anyhow::bail!("A service and a 5-digit ZIP code are required (got '{}')", zip);
    }

    let confirmer: Box<dyn Confirmer> = if upgrade {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(AlwaysDecline)
    };
    let mut app = super::build_coordinator(&cfg, confirmer);
    if upgrade {
        app.upgrade();
    }

    println!("{}", "Fetching benchmark...".yellow());
    let state = app.search(form.service(), form.zip()).await?;

    match (state, app.render()) {
        (ViewState::Dashboard, Some(view)) => println!("{}", view),
        _ => anyhow::bail!("Benchmark could not be loaded"),
    }

    Ok(())
}
