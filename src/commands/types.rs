// src/commands/types.rs
use crate::fs::FileSystem;

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self { stdout, stderr: String::new(), exit_code: 0 }
    }

    pub fn error(stderr: String) -> Self {
        Self { stdout: String::new(), stderr, exit_code: 1 }
    }

    pub fn with_exit_code(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code }
    }

    pub fn empty() -> Self {
        Self::success(String::new())
    }
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub fs: &'a mut dyn FileSystem,
}

/// A verb the interpreter can dispatch to.
pub trait Command {
    fn name(&self) -> &'static str;

    /// Alternative verbs for the same command.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult;
}
