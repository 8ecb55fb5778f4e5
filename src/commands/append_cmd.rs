// src/commands/append_cmd.rs
use crate::commands::utils::fs_failure;
use crate::commands::{Command, CommandContext, CommandResult};

/// `append TEXT... PATH`: the last operand is always the path.
pub struct AppendCommand;

impl Command for AppendCommand {
    fn name(&self) -> &'static str {
        "append"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let Some((path, words)) = ctx.args.split_last() else {
            return CommandResult::error("append: missing operand\n".to_string());
        };
        if words.is_empty() {
            return CommandResult::error(format!("append: missing text before '{}'\n", path));
        }

        let joined = words.join(" ");
        match ctx.fs.append(strip_outer_quotes(&joined), path) {
            Ok(()) => CommandResult::empty(),
            Err(e) => fs_failure(self.name(), &e),
        }
    }
}

/// Drop one matching pair of quote characters around `text`.
fn strip_outer_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
