// src/commands/utils/mod.rs
use crate::commands::CommandResult;
use crate::fs::FsError;

/// Exactly `count` operands, or the diagnostic to return instead.
pub fn operands<'a>(name: &str, args: &'a [String], count: usize) -> Result<&'a [String], CommandResult> {
    if args.len() < count {
        return Err(CommandResult::error(format!("{}: missing operand\n", name)));
    }
    if let Some(extra) = args.get(count) {
        return Err(CommandResult::error(format!("{}: extra operand '{}'\n", name, extra)));
    }
    Ok(args)
}

/// Report a file system failure as `name: error`.
pub fn fs_failure(name: &str, err: &FsError) -> CommandResult {
    CommandResult::error(format!("{}: {}\n", name, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_operands_exact() {
        let given = args(&["a", "b"]);
        assert_eq!(operands("mv", &given, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_operands_missing() {
        let err = operands("mv", &args(&["a"]), 2).unwrap_err();
        assert_eq!(err.stderr, "mv: missing operand\n");
        assert_eq!(err.exit_code, 1);
    }

    #[test]
    fn test_operands_extra() {
        let err = operands("ls", &args(&["x"]), 0).unwrap_err();
        assert_eq!(err.stderr, "ls: extra operand 'x'\n");
    }

    #[test]
    fn test_fs_failure_includes_error() {
        let err = FsError::NotFound {
            path: "/x".to_string(),
            operation: "show".to_string(),
        };
        let result = fs_failure("show", &err);
        assert_eq!(result.stderr, "show: ENOENT: no such file or directory, show '/x'\n");
    }
}
