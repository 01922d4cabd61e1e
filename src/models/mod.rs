pub mod benchmark;
pub mod gemini;

pub use benchmark::{PriceTier, PricingBenchmark, RawBenchmark};
