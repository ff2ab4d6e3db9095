pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod fetch;
pub mod session;
pub mod tui;

pub use error::{Error, Result};
