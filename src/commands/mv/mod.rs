// src/commands/mv/mod.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct MoveCommand;

impl Command for MoveCommand {
    fn name(&self) -> &'static str {
        "move"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["mv"]
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let (src, dest) = match operands(self.name(), &ctx.args, 2) {
            Ok(args) => (&args[0], &args[1]),
            Err(result) => return result,
        };

        match ctx.fs.mv(src, dest) {
            Ok(()) => CommandResult::empty(),
            Err(e) => CommandResult::error(format!(
                "move: cannot move '{}' to '{}': {}\n",
                src,
                dest,
                e.reason()
            )),
        }
    }
}
