//! Database module exports.

pub mod danmaku;
pub mod photo;

pub use danmaku::DanmakuRecord;
pub use photo::{PhotoCounter, PhotoRecord};
