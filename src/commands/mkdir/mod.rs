// src/commands/mkdir/mod.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::FsError;

pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let dir = match operands(self.name(), &ctx.args, 1) {
            Ok(args) => &args[0],
            Err(result) => return result,
        };

        match ctx.fs.create_dir(dir) {
            Ok(()) => CommandResult::empty(),
            Err(e @ FsError::InvalidName { .. }) => {
                CommandResult::error(format!("mkdir: {}\n", e))
            }
            Err(e) => CommandResult::error(format!(
                "mkdir: cannot create directory '{}': {}\n",
                dir,
                e.reason()
            )),
        }
    }
}
