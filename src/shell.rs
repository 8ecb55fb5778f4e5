//! Shell Session
//!
//! Ties together the line parser, the command registry and one in-memory
//! file system. Each `Shell` is an independent session.

use tracing::{debug, warn};

use crate::commands::{create_default_registry, CommandContext, CommandRegistry, CommandResult};
use crate::fs::InMemoryFs;
use crate::parser::{parse_line, CommandLine};

/// Exit status requested by `quit`.
pub const QUIT_EXIT_CODE: i32 = 1;

/// Options for creating a shell session.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Text written before each interactive read
    pub prompt: String,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
        }
    }
}

/// What running one input line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub result: CommandResult,
    /// Set when the line asked the session to end, with the exit status.
    pub quit: Option<i32>,
}

impl LineOutcome {
    fn done(result: CommandResult) -> Self {
        Self { result, quit: None }
    }
}

/// Output of a whole script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub stdout: String,
    pub stderr: String,
    /// Status of the last command, or the `quit` status.
    pub exit_code: i32,
    pub quit: bool,
}

pub struct Shell {
    pub fs: InMemoryFs,
    registry: CommandRegistry,
    options: ShellOptions,
}

impl Shell {
    pub fn new(options: ShellOptions) -> Self {
        let registry = create_default_registry();
        debug!(commands = ?registry.names(), "shell ready");
        Self {
            fs: InMemoryFs::new(),
            registry,
            options,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.options.prompt
    }

    /// Run one line of input.
    pub fn exec_line(&mut self, line: &str) -> LineOutcome {
        let parsed = match parse_line(line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return LineOutcome::done(CommandResult::empty()),
            Err(e) => {
                warn!(line, error = %e, "could not split line");
                return LineOutcome::done(CommandResult::with_exit_code(
                    String::new(),
                    format!("memfs: syntax error: {}\n", e),
                    2,
                ));
            }
        };

        if parsed.verb == "quit" {
            debug!("quit requested");
            return LineOutcome {
                result: CommandResult::empty(),
                quit: Some(QUIT_EXIT_CODE),
            };
        }

        LineOutcome::done(self.dispatch(parsed))
    }

    fn dispatch(&mut self, line: CommandLine) -> CommandResult {
        let Some(cmd) = self.registry.get(&line.verb) else {
            debug!(verb = %line.verb, "unknown verb, echoing input");
            let echoed = line.tokens().collect::<Vec<_>>().join(" ");
            return CommandResult::success(format!("{} \n", echoed));
        };

        debug!(verb = %line.verb, args = ?line.args, "dispatching");
        let result = cmd.execute(CommandContext {
            args: line.args,
            fs: &mut self.fs,
        });
        if result.exit_code != 0 {
            warn!(
                command = cmd.name(),
                exit_code = result.exit_code,
                stderr = result.stderr.trim_end(),
                "command failed"
            );
        }
        result
    }

    /// Run every line of `script`, stopping early at `quit`.
    pub fn exec(&mut self, script: &str) -> ScriptOutcome {
        let mut outcome = ScriptOutcome {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            quit: false,
        };
        for line in script.lines() {
            let LineOutcome { result, quit } = self.exec_line(line);
            outcome.stdout.push_str(&result.stdout);
            outcome.stderr.push_str(&result.stderr);
            outcome.exit_code = result.exit_code;
            if let Some(code) = quit {
                outcome.exit_code = code;
                outcome.quit = true;
                break;
            }
        }
        outcome
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellOptions::default())
    }
}
