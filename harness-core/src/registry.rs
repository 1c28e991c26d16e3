//! Registry of handler commands known to the host script.
//!
//! Commands are registered as factories and a fresh command is created for
//! every invocation, so no state survives between calls.

use std::collections::BTreeMap;

use tracing::debug;

use crate::command::HandlerCommand;
use crate::command_core::run_command;
use crate::error::{HarnessError, Result};
use crate::scope::Scope;

/// Function that creates a command instance.
pub type CommandFactory = Box<dyn Fn() -> Box<dyn HandlerCommand>>;

/// Maps command names to their factories.
#[derive(Default)]
pub struct CommandRegistry {
    factories: BTreeMap<String, CommandFactory>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn HandlerCommand> + 'static,
    {
        debug!(command = name, "registering command");
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Create a new command instance.
    pub fn create(&self, name: &str) -> Result<Box<dyn HandlerCommand>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| HarnessError::UnknownCommand(name.to_string()))
    }

    /// Run the named command once.
    pub fn invoke(&self, name: &str, tokens: &[String], scope: &mut Scope) -> Result<bool> {
        let command = self.create(name)?;
        Ok(run_command(command.as_ref(), tokens, scope))
    }
}
