//! Danmaku content rules.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest accepted danmaku, in Unicode code points.
pub const MAX_DANMAKU_CHARS: usize = 20;

/// CJK scripts, ASCII letters and digits, and ASCII whitespace.
static DANMAKU_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{Han}\p{Katakana}\p{Hiragana}\p{Hangul}a-zA-Z0-9\t\n\x0C\r ]+$")
        .expect("danmaku charset pattern is valid")
});

/// Check a candidate danmaku against the charset and length limits.
///
/// Length is counted in code points, so `世界` is two characters.
pub fn is_valid_danmaku(text: &str) -> bool {
    DANMAKU_CHARSET.is_match(text) && text.chars().count() <= MAX_DANMAKU_CHARS
}
