use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use super::{SearchItem, Selector};
use crate::error::DailyError;
use crate::exec::{self, CommandBuilder};

const PROGRAM: &str = "fzf";
const INSTALL_HINT: &str = "Install fzf (brew install fzf, or apt-get install fzf), \
     or set `finder = \"skim\"` in ~/.daily/config.toml to use the built-in finder";

// fzf exit codes: 1 = no match, 130 = interrupted (Esc / Ctrl-C)
const EXIT_NO_MATCH: i32 = 1;
const EXIT_INTERRUPTED: i32 = 130;

/// Runs the external `fzf` binary; the preview is rendered by `cat` on the note
pub struct FzfSelector {
    program: String,
    dailies_dir: PathBuf,
}

impl FzfSelector {
    pub fn new(dailies_dir: impl Into<PathBuf>) -> Self {
        Self::with_program(PROGRAM, dailies_dir)
    }

    /// Use a specific fzf-compatible binary
    pub fn with_program(program: impl Into<String>, dailies_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dailies_dir: dailies_dir.into(),
        }
    }

    fn command(&self, query: &str) -> CommandBuilder {
        // `{1}` is the date, the first field of every label
        CommandBuilder::new(&self.program)
            .arg("--prompt=Select daily file > ")
            .arg("--preview=cat {1}-daily.md 2>/dev/null || echo 'Preview not available'")
            .arg("--preview-window=right:50%:wrap")
            .arg("--ansi")
            .arg(format!("--query={}", query))
            .working_dir(&self.dailies_dir)
    }
}

impl Selector for FzfSelector {
    fn select(&self, items: &[SearchItem], query: &str) -> Result<Option<usize>> {
        let labels: Vec<String> = items.iter().map(SearchItem::label).collect();
        let input = labels.join("\n");

        let result = match self.command(query).execute_with_input(&input) {
            Ok(result) => result,
            Err(e) if exec::is_not_found(&e) => {
                return Err(DailyError::missing(&self.program, INSTALL_HINT).into());
            }
            Err(e) => return Err(e),
        };

        if matches!(result.exit_code, EXIT_NO_MATCH | EXIT_INTERRUPTED) {
            return Ok(None);
        }
        if !result.success {
            anyhow::bail!("{} exited with code {}", self.program, result.exit_code);
        }

        Ok(pick(&labels, &result.stdout))
    }
}

/// Map fzf's printed line back to an item index
fn pick(labels: &[String], stdout: &str) -> Option<usize> {
    let chosen = stdout.lines().next()?.trim_end();
    debug!(chosen, "fzf selection");
    labels.iter().position(|label| label == chosen)
}
