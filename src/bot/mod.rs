//! Bot module - Core bot functionality.

pub mod dispatcher;
pub mod ports;
mod runtime;
pub mod webhook;

#[cfg(test)]
pub mod testing;

pub use dispatcher::Dispatcher;
pub use runtime::run;
pub use webhook::AppState;
