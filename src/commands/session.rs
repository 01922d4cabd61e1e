use anyhow::{anyhow, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pricepoint::{
    app::Coordinator,
    calculator::{coerce_number, CalculatorField},
    config::Config,
    search::{SearchForm, PRESET_SERVICES},
    tier::{AlwaysConfirm, AlwaysDecline, Confirmer, InteractiveConfirmer, SharedInput, UserTier},
    view::ViewState,
};
use std::io::{BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const LOADING_MESSAGES: [&str; 5] = [
    "Connecting to local market data...",
    "Analyzing competitor pricing...",
    "Calculating profit margins...",
    "Normalizing data by service type...",
    "Finalizing benchmark report...",
];

const LOADING_INTERVAL: Duration = Duration::from_millis(800);

/// How the upgrade prompt is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    Interactive,
    Always,
    Never,
}

impl ConfirmMode {
    pub fn from_flags(yes: bool, no: bool) -> Self {
        match (yes, no) {
            (true, _) => ConfirmMode::Always,
            (_, true) => ConfirmMode::Never,
            _ => ConfirmMode::Interactive,
        }
    }
}

/// Execute the interactive session
pub async fn execute(cfg: Config, mode: ConfirmMode) -> Result<()> {
    let stdin: Box<dyn BufRead + Send> = Box::new(BufReader::new(std::io::stdin()));
    let input: SharedInput = Arc::new(Mutex::new(stdin));

    let confirmer: Box<dyn Confirmer> = match mode {
        ConfirmMode::Always => Box::new(AlwaysConfirm),
        ConfirmMode::Never => Box::new(AlwaysDecline),
        ConfirmMode::Interactive => {
            Box::new(InteractiveConfirmer::new(input.clone(), Box::new(std::io::stdout())))
        }
    };

    let mut app = super::build_coordinator(&cfg, confirmer);
    let mut form = SearchForm::default();

    loop {
        print_navbar(app.tier());
        let keep_going = match app.view_state() {
            ViewState::Dashboard => dashboard_step(&mut app, &input)?,
            _ => landing_step(&mut app, &mut form, &input).await?,
        };
        if !keep_going {
            break;
        }
    }

    println!("{}", "Goodbye.".dimmed());
    Ok(())
}

fn print_navbar(tier: UserTier) {
    let badge = match tier {
        UserTier::Free => "Unlock Pro Data (type `upgrade`)".yellow(),
        UserTier::Pro => "PRO ACTIVE".green().bold(),
    };
    println!();
    println!("{}  {}", "◎ PricePoint".blue().bold(), badge);
    println!("{}", "─".repeat(60).dimmed());
}

/// Read one trimmed line; `None` at end of input
fn read_line(input: &SharedInput, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = input
        .lock()
        .map_err(|_| anyhow!("stdin lock poisoned"))?
        .read_line(&mut line)?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_string()))
    }
}

/// Landing screen. Returns `false` when the user quits.
async fn landing_step(app: &mut Coordinator, form: &mut SearchForm, input: &SharedInput) -> Result<bool> {
    println!("{}", "Stop guessing your prices.".bold());
    println!("See real local rates before you quote the job.");
    println!();
    for (idx, service) in PRESET_SERVICES.iter().enumerate() {
        println!("  {}. {}", idx + 1, service);
    }
    println!();

    let prompt = format!("Service [{}]: ", form.service());
    let service = match read_line(input, &prompt)? {
        None => return Ok(false),
        Some(line) => line,
    };
    match service.as_str() {
        "quit" | "exit" => return Ok(false),
        "upgrade" => {
            app.upgrade();
            return Ok(true);
        }
        "" => {}
        other => form.set_service(other),
    }

    let zip = match read_line(input, "ZIP code (e.g. 90210): ")? {
        None => return Ok(false),
        Some(line) => line,
    };
    form.set_zip(&zip);

    if !form.can_submit() {
        println!("{}", "Enter a service and a 5-digit ZIP code.".red());
        return Ok(true);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(LOADING_MESSAGES[0]);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let rotator = {
        let spinner = spinner.clone();
        tokio::spawn(async move {
            for message in LOADING_MESSAGES.iter().cycle().skip(1) {
                tokio::time::sleep(LOADING_INTERVAL).await;
                spinner.set_message(*message);
            }
        })
    };

    let service = form.service().to_string();
    let zip = form.zip().to_string();
    let outcome = app.search(&service, &zip).await;

    rotator.abort();
    spinner.finish_and_clear();

    let state = outcome?;
    debug!(?state, "Search settled");
    Ok(true)
}

/// Dashboard screen. Returns `false` when the user quits.
fn dashboard_step(app: &mut Coordinator, input: &SharedInput) -> Result<bool> {
    if let Some(view) = app.render() {
        println!("{}", view);
    }
    println!(
        "{}",
        "Commands: price|labor|supplies|overhead <n>, upgrade, reset, quit".dimmed()
    );

    let line = match read_line(input, "> ")? {
        None => return Ok(false),
        Some(line) => line,
    };

    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "exit"), _) => return Ok(false),
        (Some("reset" | "new"), _) => app.reset(),
        (Some("upgrade"), _) => {
            if app.upgrade().is_pro() {
                println!("{}", "✓ Pro access unlocked".green());
            }
        }
        (Some(field), value) => match field.parse::<CalculatorField>() {
            Ok(field) => {
                let value = coerce_number(value.unwrap_or_default());
                app.update_calculator(field, value)?;
            }
            Err(e) => println!("{}", e.as_str().red()),
        },
        (None, _) => {}
    }

    Ok(true)
}
