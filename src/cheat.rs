/// Standup cheat sheet: which sections to show, tag filtering and rendering.
use chrono::NaiveDate;
use crossterm::style::{Color, Stylize};

use crate::entry::{Entry, Section};
use crate::markdown;

/// Sections shown at standup, in display order
pub const CHEAT_SECTIONS: [Section; 4] = [
    Section::Done,
    Section::Meetings,
    Section::Todo,
    Section::Blockers,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatSection {
    pub section: Section,
    pub entries: Vec<Entry>,
}

impl CheatSection {
    pub fn title(&self) -> &'static str {
        match self.section {
            Section::Done => "DONE",
            Section::Meetings => "MEETINGS",
            Section::Todo => "TO DO",
            Section::Blockers => "BLOCKERS",
            Section::QuickNotes => "QUICK NOTES",
        }
    }

    fn style(&self) -> (Color, &'static str) {
        match self.section {
            Section::Done => (Color::Green, "✅"),
            Section::Meetings => (Color::Blue, "🗓"),
            Section::Todo => (Color::Yellow, "▶️"),
            Section::Blockers => (Color::Red, "🚧"),
            Section::QuickNotes => (Color::Magenta, "🧠"),
        }
    }
}

/// Parsed standup view of one day note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatSheet {
    pub date: NaiveDate,
    pub sections: Vec<CheatSection>,
}

impl CheatSheet {
    /// Build from note content. Only entries sharing a tag with `filter` are kept
    /// when it is non-empty; sections left without entries are dropped.
    pub fn build(date: NaiveDate, content: &str, filter: &[String]) -> Self {
        let sections = CHEAT_SECTIONS
            .iter()
            .map(|&section| {
                let mut entries = markdown::entries(content, section);
                if !filter.is_empty() {
                    entries.retain(|entry| entry.matches_any(filter));
                }
                CheatSection { section, entries }
            })
            .filter(|s| !s.entries.is_empty())
            .collect();

        Self { date, sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Styling-free text
    pub fn render_plain(&self) -> String {
        self.sections
            .iter()
            .map(|section| {
                let mut block = section.title().to_string();
                for entry in &section.entries {
                    block.push('\n');
                    block.push_str(&entry.to_string());
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Terminal styling: date banner, coloured headers, cyan tags
    pub fn render_colored(&self) -> String {
        let banner = format!("── {} ──", self.date.format("%A, %B %d"));
        let mut lines = vec![String::new(), banner.as_str().dim().to_string()];

        for section in &self.sections {
            let (color, icon) = section.style();
            lines.push(format!("{} {}", icon, section.title().bold().with(color)));
            for entry in &section.entries {
                lines.push(format!("   • {}", colored_entry(entry)));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

fn colored_entry(entry: &Entry) -> String {
    if entry.tags.is_empty() {
        return entry.text.clone();
    }
    let tags: Vec<String> = entry
        .tags
        .iter()
        .map(|tag| format!("#{}", tag).as_str().cyan().to_string())
        .collect();
    format!("{}  {}", entry.text, tags.join(" "))
}
