//! Interaction modes for attendees.
//!
//! A user becomes "armed" for a mode by sending its trigger phrase and
//! stays armed until the mode's window runs out.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let modes = ModeResolver::new(CacheConfig::mode_flags());
//!
//! modes.arm("U123", Mode::Danmaku, Duration::from_secs(60));
//! if modes.is_armed("U123", Mode::Danmaku) {
//!     // ...
//! }
//! ```

mod resolver;

pub use resolver::{Mode, ModeResolver};
