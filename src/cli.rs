// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `fwatch`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "fwatch",
    version,
    about = "Poll files for changes and run a command when they do.",
    long_about = None
)]
pub struct CliArgs {
    /// Files or directories to watch.
    ///
    /// Required unless the `--config` file lists `paths`.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// How often to check for changes, in milliseconds (default 1000).
    #[arg(short = 'p', long, value_name = "MS")]
    pub poll_rate: Option<u64>,

    /// Command to run when a file changes.
    ///
    /// Split into words like a shell would, then executed directly.
    #[arg(short = 'u', long, value_name = "CMD")]
    pub on_update: Option<String>,

    /// Path to a .gitignore-style file with extra exclusion rules.
    #[arg(short = 'g', long, value_name = "PATH")]
    pub gitignore: Option<PathBuf>,

    /// Optional TOML settings file; command-line values take precedence.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    pub once: bool,

    /// Print the resolved settings and watched files, but don't watch or run
    /// anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags_and_paths() {
        let args = CliArgs::try_parse_from([
            "fwatch", "-p", "250", "-u", "make test", "-g", ".gitignore", "src", "docs",
        ])
        .unwrap();

        assert_eq!(args.poll_rate, Some(250));
        assert_eq!(args.on_update.as_deref(), Some("make test"));
        assert_eq!(args.gitignore, Some(PathBuf::from(".gitignore")));
        assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("docs")]);
        assert!(!args.once);
    }

    #[test]
    fn rejects_non_numeric_poll_rate() {
        assert!(CliArgs::try_parse_from(["fwatch", "--poll-rate", "soon", "src"]).is_err());
    }
}
