// src/commands/show_cmd.rs
use crate::commands::utils::{fs_failure, operands};
use crate::commands::{Command, CommandContext, CommandResult};

pub struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &'static str {
        "show"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let path = match operands(self.name(), &ctx.args, 1) {
            Ok(args) => &args[0],
            Err(result) => return result,
        };

        match ctx.fs.show(path) {
            Ok(content) => CommandResult::success(format!("{}\n", content)),
            Err(e) => fs_failure(self.name(), &e),
        }
    }
}
