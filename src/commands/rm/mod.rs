// src/commands/rm/mod.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};

/// `delete` / `rm`: remove one entry. Other aliases of the node survive.
pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rm"]
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let path = match operands(self.name(), &ctx.args, 1) {
            Ok(args) => &args[0],
            Err(result) => return result,
        };

        match ctx.fs.delete(path) {
            Ok(()) => CommandResult::empty(),
            Err(e) => CommandResult::error(format!(
                "delete: cannot remove '{}': {}\n",
                path,
                e.reason()
            )),
        }
    }
}
