// src/commands/ls/mod.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};

/// `listfiles` / `ls`: fixed-width listing of the working directory.
pub struct ListFilesCommand;

impl Command for ListFilesCommand {
    fn name(&self) -> &'static str {
        "listfiles"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ls"]
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if let Err(result) = operands(self.name(), &ctx.args, 0) {
            return result;
        }
        CommandResult::success(ctx.fs.list().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileSystem, InMemoryFs};

    fn make_ctx<'a>(fs: &'a mut InMemoryFs, args: Vec<&str>) -> CommandContext<'a> {
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            fs,
        }
    }

    #[test]
    fn test_ls_empty_root() {
        let mut fs = InMemoryFs::new();
        let result = ListFilesCommand.execute(make_ctx(&mut fs, vec![]));
        assert_eq!(result.stdout, "\n=== / ===\n\n");
    }

    #[test]
    fn test_ls_rows() {
        let mut fs = InMemoryFs::new();
        fs.create_dir("/docs").unwrap();
        fs.create_file("/docs/a").unwrap();
        fs.create_file("/docs/readme").unwrap();
        fs.append("hello world!", "/docs/readme").unwrap();
        fs.enter("/docs").unwrap();

        let result = ListFilesCommand.execute(make_ctx(&mut fs, vec![]));
        let expected = format!(
            "\n=== /docs/ ===\n{:<21}  {:>10}\n{:<21}  {:>10}\n\n",
            "a", 0, "readme", 12
        );
        assert_eq!(result.stdout, expected);
    }

    #[test]
    fn test_ls_rejects_operands() {
        let mut fs = InMemoryFs::new();
        let result = ListFilesCommand.execute(make_ctx(&mut fs, vec!["/x"]));
        assert_eq!(result.exit_code, 1);
    }
}
