// src/commands/ln/mod.rs
use crate::commands::utils::operands;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::FsError;

/// `link LINK_PATH ORIG_PATH`: another entry for an existing node.
pub struct LinkCommand;

impl Command for LinkCommand {
    fn name(&self) -> &'static str {
        "link"
    }

    fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let (link_path, orig_path) = match operands(self.name(), &ctx.args, 2) {
            Ok(args) => (&args[0], &args[1]),
            Err(result) => return result,
        };

        match ctx.fs.link(link_path, orig_path) {
            Ok(()) => CommandResult::empty(),
            Err(FsError::AlreadyExists { .. }) => CommandResult::error(format!(
                "link: failed to create link '{}': File exists\n",
                link_path
            )),
            Err(e) if e.path() == orig_path.as_str() => CommandResult::error(format!(
                "link: failed to access '{}': {}\n",
                orig_path,
                e.reason()
            )),
            Err(e) => CommandResult::error(format!("link: {}\n", e)),
        }
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
    fn test_link_shares_content() {
        let mut fs = InMemoryFs::new();
        fs.create_file("/orig").unwrap();
        let result = LinkCommand.execute(make_ctx(&mut fs, vec!["/alias", "/orig"]));
        assert_eq!(result.exit_code, 0);
        fs.append("x", "/orig").unwrap();
        assert_eq!(fs.show("/alias").unwrap(), "x");
    }

    #[test]
    fn test_link_missing_original() {
        let mut fs = InMemoryFs::new();
        let result = LinkCommand.execute(make_ctx(&mut fs, vec!["/alias", "/orig"]));
        assert_eq!(
            result.stderr,
            "link: failed to access '/orig': No such file or directory\n"
        );
    }

    #[test]
    fn test_link_existing_name() {
        let mut fs = InMemoryFs::new();
        fs.create_file("/orig").unwrap();
        fs.create_file("/alias").unwrap();
        let result = LinkCommand.execute(make_ctx(&mut fs, vec!["/alias", "/orig"]));
        assert_eq!(
            result.stderr,
            "link: failed to create link '/alias': File exists\n"
        );
    }
}
