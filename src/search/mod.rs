/// Tag-filtered listing of day notes handed to an interactive fuzzy finder
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::calendar;
use crate::config::Finder;
use crate::entry::Section;
use crate::exec::Editor;
use crate::fs::DailyStore;
use crate::markdown;

pub mod embedded;
pub mod fzf;

pub use fzf::FzfSelector;
pub use embedded::SkimSelector;

/// One selectable day note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub date: NaiveDate,
    pub path: PathBuf,
    /// Union of tags over every entry, sorted
    pub tags: BTreeSet<String>,
}

impl SearchItem {
    /// `2026-02-20 (Friday) - tags: aws,deploy`
    pub fn label(&self) -> String {
        let base = calendar::day_label(self.date);
        if self.tags.is_empty() {
            base
        } else {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            format!("{} - tags: {}", base, tags.join(","))
        }
    }

    /// File content shown next to the list
    pub fn preview(&self) -> String {
        preview(&self.path)
    }
}

/// Note content for a preview pane
pub fn preview(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| "Preview not available".to_string())
}

/// An interactive picker over labelled items
pub trait Selector {
    /// Index of the chosen item, or `None` when the user aborts
    fn select(&self, items: &[SearchItem], query: &str) -> Result<Option<usize>>;
}

/// The selector configured for this invocation
pub fn selector_for(finder: Finder, store: &DailyStore) -> Box<dyn Selector> {
    match finder {
        Finder::Fzf => Box::new(FzfSelector::new(store.root())),
        Finder::Skim => Box::new(SkimSelector::new()),
    }
}

/// Tags used anywhere in a note
pub fn note_tags(content: &str) -> BTreeSet<String> {
    Section::ALL
        .iter()
        .flat_map(|&section| markdown::entries(content, section))
        .flat_map(|entry| entry.tags)
        .collect()
}

/// Notes newest first; with a non-empty `filter`, only those sharing a tag with it
pub fn collect(store: &DailyStore, filter: &[String]) -> Result<Vec<SearchItem>> {
    let mut items = Vec::new();

    for file in store.list()? {
        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %file.path.display(), "skipping unreadable note: {}", e);
                continue;
            }
        };

        let tags = note_tags(&content);
        if !filter.is_empty() && !filter.iter().any(|tag| tags.contains(tag)) {
            continue;
        }

        items.push(SearchItem {
            date: file.date,
            path: file.path,
            tags,
        });
    }

    Ok(items)
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoFiles,
    Cancelled,
    Opened(PathBuf),
}

/// Collect, let the user pick, open the pick in the editor
pub fn run(
    store: &DailyStore,
    filter: &[String],
    selector: &dyn Selector,
    editor: &dyn Editor,
) -> Result<SearchOutcome> {
    let items = collect(store, filter)?;
    if items.is_empty() {
        return Ok(SearchOutcome::NoFiles);
    }

    let query = filter.join(" ");
    let Some(idx) = selector.select(&items, &query)? else {
        info!("search cancelled");
        return Ok(SearchOutcome::Cancelled);
    };
    let Some(item) = items.get(idx) else {
        return Ok(SearchOutcome::Cancelled);
    };

    info!(path = %item.path.display(), "selected day note");
    editor.open(&item.path)?;
    Ok(SearchOutcome::Opened(item.path.clone()))
}
