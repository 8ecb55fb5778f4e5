// src/commands/enter/mod.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct EnterCommand;

impl Command for EnterCommand {
    fn name(&self) -> &'static str {
        "enter"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["cd"]
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let path = match operands(self.name(), &ctx.args, 1) {
            Ok(args) => &args[0],
            Err(result) => return result,
        };

        match ctx.fs.enter(path) {
            Ok(()) => CommandResult::empty(),
            Err(e) => CommandResult::error(format!("enter: {}: {}\n", path, e.reason())),
        }
    }
}
