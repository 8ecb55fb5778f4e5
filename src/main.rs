use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use memfs::config::ShellConfig;
use memfs::logging::init_logging;
use memfs::shell::Shell;

#[derive(Parser)]
#[command(name = "memfs")]
#[command(about = "An interactive in-memory file system with hard-link style aliases")]
#[command(version)]
struct Cli {
    /// Run commands from the argument, one per line
    #[arg(short = 'c')]
    script: Option<String>,

    /// TOML configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Log file, used when logging output includes a file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Do not print the prompt before reading from stdin
    #[arg(long = "no-prompt")]
    no_prompt: bool,

    /// Print one JSON object per command (command, stdout, stderr, exitCode)
    #[arg(long = "json")]
    json: bool,

    /// Script file to execute
    #[arg()]
    script_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load_from_file(path).unwrap_or_else(|e| fail(&e)),
        None => ShellConfig::default(),
    };
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }
    if let Err(e) = init_logging(&config.logging, cli.log_file.clone()) {
        fail(&e);
    }

    let mut shell = Shell::new(config.shell_options());

    // Determine input: -c, file, or stdin
    let script = if let Some(s) = cli.script.clone() {
        Some(s)
    } else if let Some(file) = &cli.script_file {
        match std::fs::read_to_string(file) {
            Ok(content) => Some(content),
            Err(e) => fail(&format!("cannot read script file {}: {}", file.display(), e)),
        }
    } else {
        None
    };

    let status = match script {
        Some(script) => script
            .lines()
            .find_map(|line| run_line(&mut shell, line, cli.json))
            .unwrap_or(0),
        None => run_stdin(&mut shell, &cli),
    };
    std::process::exit(status);
}

/// Read and run lines until EOF or `quit`.
fn run_stdin(shell: &mut Shell, cli: &Cli) -> i32 {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        if !cli.no_prompt {
            print!("{}", shell.prompt());
            let _ = std::io::stdout().flush();
        }
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => return 0,
            Ok(_) => {
                if let Some(code) = run_line(shell, &line, cli.json) {
                    return code;
                }
            }
            Err(e) => {
                eprintln!("memfs: failed to read input: {}", e);
                return 1;
            }
        }
    }
}

/// Run one line and print its output. Returns the exit status when the session ends.
fn run_line(shell: &mut Shell, line: &str, json: bool) -> Option<i32> {
    let outcome = shell.exec_line(line);
    let result = &outcome.result;
    if json {
        if !line.trim().is_empty() {
            println!(
                "{}",
                serde_json::json!({
                    "command": line.trim_end_matches(['\r', '\n']),
                    "stdout": result.stdout,
                    "stderr": result.stderr,
                    "exitCode": outcome.quit.unwrap_or(result.exit_code),
                })
            );
        }
    } else {
        if !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            eprint!("{}", result.stderr);
        }
    }
    let _ = std::io::stdout().flush();
    outcome.quit
}

fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("memfs: {}", err);
    std::process::exit(1);
}
