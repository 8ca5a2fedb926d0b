//! External process abstractions
//!
//! Trait-based wrapper around process execution so that git invocations can be
//! exercised in tests without spawning real processes.

pub mod command;
#[cfg(test)]
pub mod mock;

pub use command::{
    CommandError, CommandExecutor, CommandOutput, CommandResult, CommandRunner,
    ProcessCommandExecutor, DEFAULT_COMMAND_TIMEOUT,
};
