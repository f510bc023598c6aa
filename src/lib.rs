//! A chat bot plugin that answers `wiki` commands with Minecraft Wiki summaries.

pub mod command;
pub mod config;
pub mod consts;
mod error;
pub mod event;
pub mod plugin;

pub use config::Config;
pub use error::Error;
pub use event::{MessageEvent, Reply, Scope};
pub use plugin::{Plugin, Registry};
