use anyhow::Result;
use skim::prelude::*;
use std::path::PathBuf;

use super::{SearchItem, Selector};

/// In-process fuzzy finder built on skim; no external binary needed
#[derive(Default)]
pub struct SkimSelector;

impl SkimSelector {
    pub fn new() -> Self {
        Self
    }
}

/// A day note as a skim item; the preview pane shows the file
struct DayItem {
    index: usize,
    label: String,
    path: PathBuf,
}

impl SkimItem for DayItem {
    fn text(&self) -> Cow<str> {
        Cow::Borrowed(&self.label)
    }

    fn preview(&self, _context: PreviewContext) -> ItemPreview {
        ItemPreview::Text(super::preview(&self.path))
    }

    fn output(&self) -> Cow<str> {
        Cow::Owned(self.index.to_string())
    }
}

impl Selector for SkimSelector {
    fn select(&self, items: &[SearchItem], query: &str) -> Result<Option<usize>> {
        let options = SkimOptionsBuilder::default()
            .height("100%".to_string())
            .reverse(true)
            .multi(false)
            .prompt("Select daily file > ".to_string())
            .query(Some(query.to_string()))
            .preview(Some(String::new()))
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid skim options: {}", e))?;

        let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
        for (index, item) in items.iter().enumerate() {
            let day = DayItem {
                index,
                label: item.label(),
                path: item.path.clone(),
            };
            tx.send(Arc::new(day))
                .map_err(|e| anyhow::anyhow!("Failed to queue item for skim: {}", e))?;
        }
        drop(tx);

        let Some(output) = Skim::run_with(&options, Some(rx)) else {
            return Ok(None);
        };
        if output.is_abort {
            return Ok(None);
        }

        Ok(output
            .selected_items
            .first()
            .and_then(|item| item.output().parse::<usize>().ok()))
    }
}
