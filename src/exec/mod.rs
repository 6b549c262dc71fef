/// Subprocess execution for the external tools `daily` drives (fzf, $EDITOR)
use anyhow::{Context, Result, bail};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::error::DailyError;

/// Command builder for external programs
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    command: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

/// Captured result of a command fed through stdin
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub exit_code: i32,
    pub success: bool,
}

impl CommandBuilder {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Parse a command line such as `code --wait` into program and arguments
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("Empty command");
        };
        Ok(parts.fold(Self::new(program), |cmd, arg| cmd.arg(arg)))
    }

    /// Add a command argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set working directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            bail!("Empty command");
        }
        Ok(())
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Execute the command interactively (inherits stdin/stdout/stderr)
    ///
    /// Spawn failures are returned as `std::io::Error` so callers can tell a
    /// missing binary apart from a failing one.
    pub fn execute_interactive(&self) -> Result<i32> {
        self.validate()?;
        debug!(command = %self.command, args = ?self.args, "running interactive command");

        let status = self.build().status()?;
        Ok(status.code().unwrap_or(-1))
    }

    /// Feed `input` on stdin and capture stdout; stderr and the terminal stay attached
    pub fn execute_with_input(&self, input: &str) -> Result<CommandResult> {
        self.validate()?;
        debug!(command = %self.command, args = ?self.args, "running command with piped input");

        let mut child = self
            .build()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // The child may exit before reading everything (e.g. user aborts early)
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e).context("Failed to write to child stdin");
                }
            }
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for command: {}", self.command))?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }
}

/// True when the error chain starts at a "program not found" spawn failure
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|e| e.kind() == ErrorKind::NotFound)
        .unwrap_or(false)
}

/// Opens a day note for editing
pub trait Editor {
    fn open(&self, path: &Path) -> Result<()>;
}

/// The user's terminal editor, run as a child process
pub struct SystemEditor {
    command_line: String,
}

impl SystemEditor {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }

    /// `$EDITOR`, `$VISUAL`, or the first common editor on PATH
    pub fn from_env() -> Self {
        Self::new(get_default_editor())
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }
}

impl Editor for SystemEditor {
    fn open(&self, path: &Path) -> Result<()> {
        let cmd = CommandBuilder::from_command_line(&self.command_line)?
            .arg(path.to_string_lossy().to_string());
        info!(editor = %self.command_line, path = %path.display(), "opening editor");

        let code = match cmd.execute_interactive() {
            Ok(code) => code,
            Err(e) if is_not_found(&e) => {
                return Err(DailyError::missing(
                    cmd.program(),
                    "Set the $EDITOR environment variable to an installed editor",
                )
                .into());
            }
            Err(e) => return Err(e),
        };

        if code != 0 {
            return Err(DailyError::EditorFailed {
                editor: self.command_line.clone(),
                code,
            }
            .into());
        }
        Ok(())
    }
}

/// Get user's default editor from environment variables
///
/// Checks $EDITOR, then $VISUAL, then searches PATH for common editors (vim, nano, vi, emacs).
/// Falls back to "vi" if no editor is found.
pub fn get_default_editor() -> String {
    let from_env = |key: &str| {
        std::env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
    };

    from_env("EDITOR")
        .or_else(|| from_env("VISUAL"))
        .unwrap_or_else(|| {
            ["vim", "nano", "vi", "emacs"]
                .into_iter()
                .find(|editor| on_path(editor))
                .unwrap_or("vi")
                .to_string()
        })
}

/// Whether `program` resolves to a file in one of the `$PATH` directories
pub fn on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_with_arguments() {
        let cmd = CommandBuilder::from_command_line("code --wait").unwrap();
        assert_eq!(cmd.program(), "code");
        assert_eq!(cmd.args(), ["--wait".to_string()]);
    }

    #[test]
    fn test_empty_command_line_is_rejected() {
        assert!(CommandBuilder::from_command_line("   ").is_err());
        assert!(CommandBuilder::new("").validate().is_err());
    }

    #[test]
    fn test_missing_editor_is_missing_dependency() {
        let editor = SystemEditor::new("definitely-not-an-editor-4f2a");
        let err = editor.open(Path::new("/tmp/x.md")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DailyError>(),
            Some(DailyError::MissingDependency { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor_reports_exit_code() {
        let editor = SystemEditor::new("false");
        let err = editor.open(Path::new("/tmp/x.md")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DailyError>(),
            Some(DailyError::EditorFailed { code: 1, .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_with_input_captures_stdout() {
        let result = CommandBuilder::new("cat")
            .execute_with_input("a\nb\n")
            .unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "a\nb\n");
    }

    #[test]
    fn test_on_path_rejects_unknown_program() {
        assert!(!on_path("definitely-not-a-program-4f2a"));
    }
}
