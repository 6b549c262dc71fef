use chrono::NaiveDate;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user with a readable message.
///
/// Anything else travels as a plain `anyhow::Error` with context attached.
#[derive(Debug, Error, Diagnostic)]
pub enum DailyError {
    #[error("Invalid config file {}: {message}", path.display())]
    #[diagnostic(
        code(daily::config),
        help("Check the keys `dailies_dir`, `skip_weekends` and `finder` in the config file")
    )]
    Config { path: PathBuf, message: String },

    #[error("No entries found for {date}")]
    #[diagnostic(code(daily::not_found))]
    NoteNotFound { date: NaiveDate },

    #[error("'{program}' is not installed or not on PATH")]
    #[diagnostic(code(daily::missing_dependency))]
    MissingDependency {
        program: String,
        #[help]
        hint: String,
    },

    #[error("Text cannot be empty")]
    #[diagnostic(code(daily::empty_text))]
    EmptyText,

    #[error("I/O error on {}: {source}", path.display())]
    #[diagnostic(code(daily::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with code {code}")]
    #[diagnostic(code(daily::editor))]
    EditorFailed { editor: String, code: i32 },
}

impl DailyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing(program: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingDependency {
            program: program.into(),
            hint: hint.into(),
        }
    }
}
