/// Entries, the sections they live in, and the `#tags:` annotation.
use std::fmt;

const TAG_MARKER: &str = "#tags:";

/// The five fixed sections of a day note, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Done,
    Todo,
    Blockers,
    Meetings,
    QuickNotes,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Done,
        Section::Todo,
        Section::Blockers,
        Section::Meetings,
        Section::QuickNotes,
    ];

    /// Markdown header line as written by the template
    pub fn header(&self) -> &'static str {
        match self {
            Section::Done => "## ✅ Done",
            Section::Todo => "## ▶️ To Do",
            Section::Blockers => "## 🚧 Blockers",
            Section::Meetings => "## 🗓 Meetings",
            Section::QuickNotes => "## 🧠 Quick Notes",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::Done => "Done",
            Section::Todo => "To Do",
            Section::Blockers => "Blockers",
            Section::Meetings => "Meetings",
            Section::QuickNotes => "Quick Notes",
        }
    }
}

/// What the user is logging; each kind owns one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Done,
    Plan,
    Block,
    Meeting,
}

impl EntryKind {
    pub fn section(&self) -> Section {
        match self {
            EntryKind::Done => Section::Done,
            EntryKind::Plan => Section::Todo,
            EntryKind::Block => Section::Blockers,
            EntryKind::Meeting => Section::Meetings,
        }
    }
}

/// One list item: free text plus normalized tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub text: String,
    pub tags: Vec<String>,
}

impl Entry {
    pub fn new(text: impl Into<String>, tags: &[String]) -> Self {
        Self {
            text: text.into(),
            tags: normalize_tags(tags),
        }
    }

    /// Parse a bullet body (without the `- ` prefix); the annotation is the trailing marker
    pub fn parse(bullet: &str) -> Self {
        match bullet.rfind(TAG_MARKER) {
            Some(pos) => Self {
                text: bullet[..pos].trim().to_string(),
                tags: parse_tag_list(&bullet[pos + TAG_MARKER.len()..]),
            },
            None => Self {
                text: bullet.trim().to_string(),
                tags: Vec::new(),
            },
        }
    }

    /// Bullet body: `text` or `text #tags: a,b`
    pub fn body(&self) -> String {
        if self.tags.is_empty() && self.text.contains(TAG_MARKER) {
            // empty trailing annotation keeps the marker in the text from reading as tags
            format!("{} {}", self.text, TAG_MARKER)
        } else if self.tags.is_empty() {
            self.text.clone()
        } else {
            format!("{} {} {}", self.text, TAG_MARKER, self.tags.join(","))
        }
    }

    /// True when any tag is in `filter` (already normalized)
    pub fn matches_any(&self, filter: &[String]) -> bool {
        self.tags.iter().any(|tag| filter.contains(tag))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", self.body())
    }
}

/// Lowercase, drop blanks and duplicates, keep first-seen order
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// Comma-separated list as typed on the command line or stored in a note
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = raw.split(',').collect();
    normalize_tags(&parts)
}
