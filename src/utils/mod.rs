//! Utilities module for logging, error handling and formatting helpers

pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use error::{Result, ResultExt, SentimentError};
pub use logging::init_logging;

/// Format a probability (0.0-1.0) as a percentage string with two decimals
pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Format a duration given in milliseconds in a human-readable way
pub fn format_latency(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.0}µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.2}ms", ms)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}
