pub mod app;
pub mod calculator;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod render;
pub mod search;
pub mod service;
pub mod tier;
pub mod view;

pub use logging::init_tracing;
