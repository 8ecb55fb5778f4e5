// src/commands/home_cmd.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct HomeCommand;

impl Command for HomeCommand {
    fn name(&self) -> &'static str {
        "home"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if let Err(result) = operands(self.name(), &ctx.args, 0) {
            return result;
        }
        ctx.fs.home();
        CommandResult::empty()
    }
}
