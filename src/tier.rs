use crate::models::PriceTier;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

pub const UPGRADE_PROMPT: &str =
    "Demo: Upgrade to Pro for $29/mo to see full ranges and unlock the calculator?";

/// Access level. Starts Free; only an accepted upgrade moves it to Pro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserTier {
    #[default]
    Free,
    Pro,
}

impl UserTier {
    pub fn is_pro(self) -> bool {
        self == UserTier::Pro
    }
}

/// A value as the current tier may see it.
///
/// `Locked` carries nothing, so a gated number cannot leak into any output
/// built from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gated<T> {
    Visible(T),
    Locked,
}

impl<T> Gated<T> {
    /// Gate `value` if it is premium and the tier is not Pro
    pub fn new(tier: UserTier, premium: bool, value: T) -> Self {
        if premium && !tier.is_pro() {
            Gated::Locked
        } else {
            Gated::Visible(value)
        }
    }

    pub fn visible(&self) -> Option<&T> {
        match self {
            Gated::Visible(value) => Some(value),
            Gated::Locked => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Gated::Locked)
    }
}

/// Price of one market tier under the given access level
pub fn gate_price(tier: UserTier, price_tier: PriceTier, value: f64) -> Gated<f64> {
    Gated::new(tier, price_tier.is_premium(), value)
}

/// Yes/no confirmation used by the upgrade flow
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub struct AlwaysDecline;

impl Confirmer for AlwaysDecline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Line input shared between the terminal session and the confirmer
pub type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

/// Asks on `output` and blocks until a line is read from `input`.
/// Only "y" or "yes" (any case) accept.
pub struct InteractiveConfirmer {
    input: SharedInput,
    output: Mutex<Box<dyn Write + Send>>,
}

impl InteractiveConfirmer {
    pub fn new(input: SharedInput, output: Box<dyn Write + Send>) -> Self {
        Self {
            input,
            output: Mutex::new(output),
        }
    }

    fn ask(&self, prompt: &str) -> std::io::Result<String> {
        {
            let mut output = self
                .output
                .lock()
                .map_err(|_| std::io::Error::other("output lock poisoned"))?;
            write!(output, "{} [y/N] ", prompt)?;
            output.flush()?;
        }

        let mut line = String::new();
        self.input
            .lock()
            .map_err(|_| std::io::Error::other("input lock poisoned"))?
            .read_line(&mut line)?;
        Ok(line)
    }
}

impl Confirmer for InteractiveConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        match self.ask(prompt) {
            Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "Confirmation prompt failed, treating as declined");
                false
            }
        }
    }
}
