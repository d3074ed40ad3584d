//! Big-screen displays.
//!
//! Accepted danmaku are fanned out to every connected display over a
//! WebSocket.

mod hub;
mod socket;

pub use hub::DanmakuHub;
pub use socket::stream_to_display;
