// src/commands/deleteall_cmd.rs
use crate::commands::utils::{fs_failure, operands};
use crate::commands::{Command, CommandContext, CommandResult};

/// `deleteall PATH`: remove every entry that refers to the node at PATH.
pub struct DeleteAllCommand;

impl Command for DeleteAllCommand {
    fn name(&self) -> &'static str {
        "deleteall"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let path = match operands(self.name(), &ctx.args, 1) {
            Ok(args) => &args[0],
            Err(result) => return result,
        };

        match ctx.fs.delete_all(path) {
            Ok(_) => CommandResult::empty(),
            Err(e) => fs_failure(self.name(), &e),
        }
    }
}
