// src/commands/touch/mod.rs
use crate::commands::utils::{fs_failure, operands};
use crate::commands::{Command, CommandContext, CommandResult};

/// `create` / `touch`: make a new, empty text file.
pub struct CreateCommand;

impl Command for CreateCommand {
    fn name(&self) -> &'static str {
        "create"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["touch"]
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let file = match operands(self.name(), &ctx.args, 1) {
            Ok(args) => &args[0],
            Err(result) => return result,
        };

        match ctx.fs.create_file(file) {
            Ok(()) => CommandResult::empty(),
            Err(e) => fs_failure(self.name(), &e),
        }
    }
}
