// src/exec/command.rs

//! The update command, split into an argument vector.
//!
//! The command string is tokenized with POSIX shell-word rules: single and
//! double quotes and backslash escapes are honoured, but there is no
//! variable expansion, globbing, piping or redirection. The resulting argv is
//! executed directly, never handed to a shell.

use std::fmt;

use crate::errors::{FwatchError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    raw: String,
    argv: Vec<String>,
}

impl UpdateCommand {
    /// Split `raw` into words.
    ///
    /// Fails with a configuration error on unbalanced quotes or when the
    /// string contains no words at all.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let argv = split_words(&raw)?;
        if argv.is_empty() {
            return Err(FwatchError::config("update command is empty"));
        }
        Ok(Self { raw, argv })
    }

    /// The command as the user wrote it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

impl fmt::Display for UpdateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Shell-style word splitting without a shell.
pub fn split_words(input: &str) -> Result<Vec<String>> {
    shlex::split(input).ok_or_else(|| {
        FwatchError::config(format!(
            "cannot split update command {input:?}: unbalanced quotes or trailing escape"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let cmd = UpdateCommand::parse("cargo  test --all").unwrap();
        assert_eq!(cmd.program(), "cargo");
        assert_eq!(cmd.args(), ["test", "--all"]);
        assert_eq!(cmd.raw(), "cargo  test --all");
    }

    #[test]
    fn honours_quotes_and_escapes() {
        let words = split_words(r#"echo "hello world" 'a b' c\ d"#).unwrap();
        assert_eq!(words, ["echo", "hello world", "a b", "c d"]);
    }

    #[test]
    fn shell_metacharacters_are_plain_words() {
        let words = split_words("echo $HOME | wc -l > out").unwrap();
        assert_eq!(words, ["echo", "$HOME", "|", "wc", "-l", ">", "out"]);
    }

    #[test]
    fn unbalanced_quote_is_a_config_error() {
        let err = UpdateCommand::parse("echo 'oops").unwrap_err();
        assert!(matches!(err, FwatchError::ConfigError(_)));
    }

    #[test]
    fn blank_command_is_rejected() {
        assert!(matches!(
            UpdateCommand::parse("   ").unwrap_err(),
            FwatchError::ConfigError(msg) if msg.contains("empty")
        ));
    }
}
