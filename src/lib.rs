// Carbon Calculator - Core Library
// Exposes all modules for use in CLI, TUI, API server, and tests

pub mod error;
pub mod factors;     // Emission factor table
pub mod inputs;      // Raw inputs + declared ranges
pub mod calculator;  // Annualize, apply factors, round, sum
pub mod report;      // Presentation-neutral result view
pub mod config;      // JSON config + CLI overrides
pub mod logging;     // tracing subscriber setup

#[cfg(feature = "server")]
pub mod api;         // Axum routes for the HTTP server

// Re-export commonly used types
pub use error::CalculatorError;
pub use factors::{Category, EmissionFactorTable, EmissionFactors, DEFAULT_COUNTRY};
pub use inputs::{Bounds, InputField, RawInputs};
pub use calculator::{
    annualize, compute, compute_for_country, round_half_up,
    AnnualQuantities, EmissionResult,
};
pub use report::{country_context, format_tonnes, ChartRow, Report, Tip};
pub use config::AppConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
