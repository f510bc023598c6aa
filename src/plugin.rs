//! Plugin trait and registry.

use async_trait::async_trait;
use tracing::debug;

use crate::Error;
use crate::config::Config;
use crate::event::{MessageEvent, Reply};

/// The name of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Name(&'static str);
/// The author of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author(&'static str);
/// The version of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Version(&'static str);

/// Look up articles on the Minecraft Wiki
#[cfg(feature = "plugin-wiki")]
pub mod wiki;

/// Common includes used in plugins.
#[allow(unused)]
mod prelude {
    pub use super::{Author, Name, Plugin, Version};
    pub use crate::Error as PluginError;
    pub use crate::command::Command;
    pub use crate::event::{MessageEvent, Reply, Scope};
    pub use async_trait::async_trait;
}

/// The base trait that all plugins must implement.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Returns the name of the plugin.
    fn name() -> Name
    where
        Self: Sized;

    /// Returns the author of the plugin.
    fn author() -> Author
    where
        Self: Sized;

    /// Returns the version of the plugin.
    fn version() -> Version
    where
        Self: Sized;

    /// The constructor for a new plugin.
    fn new(config: &Config) -> Self
    where
        Self: Sized;

    /// Processes an inbound message event.
    ///
    /// Returns `Ok(Some(reply))` when the plugin wants to answer the message, `Ok(None)` when the
    /// message is none of the plugin's business.
    async fn handle_message(&self, _event: &MessageEvent) -> Result<Option<Reply>, Error> {
        Ok(None)
    }
}

/// Plugin registry.
#[derive(Default)]
pub struct Registry {
    /// List of loaded plugins.
    pub plugins: Vec<Box<dyn Plugin>>,
}

impl Registry {
    /// Constructs and returns a new, empty plugin registry.
    #[must_use]
    pub fn new() -> Registry {
        Registry { plugins: vec![] }
    }

    /// Constructs and returns a new plugin registry with initialized plugins.
    #[must_use]
    pub fn preloaded(config: &Config) -> Registry {
        let mut registry = Self::new();
        debug!("registering plugins");

        #[cfg(feature = "plugin-wiki")]
        registry.register::<wiki::Wiki>(config);

        let num_plugins = registry.plugins.len();
        debug!(%num_plugins, "finished registering plugins");

        registry
    }

    /// Registers a new plugin based on its type.
    pub fn register<P: Plugin + 'static>(&mut self, config: &Config) -> bool {
        let plugin = Box::new(P::new(config));

        self.plugins.push(plugin);

        true
    }

    /// Dispatches a message event to the registered plugins and returns the first reply, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a plugin fails while processing the event.
    pub async fn handle_message(&self, event: &MessageEvent) -> Result<Option<Reply>, Error> {
        debug!(?event, "processing message event");

        for plugin in &self.plugins {
            if let Some(reply) = plugin.handle_message(event).await? {
                return Ok(Some(reply));
            }
        }

        Ok(None)
    }
}
