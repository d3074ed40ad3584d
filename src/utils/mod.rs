//! Utility functions.
//!
//! Collection of helper functions used across the bot.

pub mod validation;

pub use validation::is_valid_danmaku;

/// Shorten user-supplied text for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}
