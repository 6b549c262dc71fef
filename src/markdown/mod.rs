/// Day note Markdown: the template and section-level edits
///
/// Notes are hand-edited, so lookups are tolerant:
/// - a header matches exactly, or by its `## <emoji> <first word>` prefix
/// - a section runs until the next line starting with `##`
use chrono::NaiveDate;

use crate::entry::{Entry, Section};

/// Fresh note for `date` with front matter and all five empty sections
pub fn template(date: NaiveDate) -> String {
    let mut content = format!("---\ntype: daily\ndate: {}\n---\n", date.format("%Y-%m-%d"));
    for section in Section::ALL {
        content.push('\n');
        content.push_str(section.header());
        content.push('\n');
    }
    content
}

/// Line index of the section header, if present
pub fn find_section(lines: &[&str], section: Section) -> Option<usize> {
    let header = section.header();

    if let Some(idx) = lines.iter().position(|line| line.trim() == header) {
        return Some(idx);
    }

    let parts: Vec<&str> = header.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    let prefix = parts[..3].join(" ");
    lines
        .iter()
        .position(|line| line.trim().starts_with(&prefix))
}

/// Index of the first `##` line after `after`, or `lines.len()`
fn next_section(lines: &[&str], after: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(after + 1)
        .find(|(_, line)| line.trim().starts_with("##"))
        .map(|(idx, _)| idx)
        .unwrap_or(lines.len())
}

/// Insert `entry` at the end of `section`, right after its last non-blank line.
///
/// A section deleted by hand is re-created at the end of the note.
pub fn insert_entry(content: &str, section: Section, entry: &Entry) -> String {
    let bullet = entry.to_string();
    let mut lines: Vec<&str> = content.split('\n').collect();

    let Some(start) = find_section(&lines, section) else {
        let mut appended = content.trim_end_matches('\n').to_string();
        appended.push_str("\n\n");
        appended.push_str(section.header());
        appended.push('\n');
        appended.push_str(&bullet);
        appended.push('\n');
        return appended;
    };

    let end = next_section(&lines, start);
    let insert_at = (start + 1..end)
        .rev()
        .find(|&idx| !lines[idx].trim().is_empty())
        .map(|idx| idx + 1)
        .unwrap_or(start + 1);

    lines.insert(insert_at, &bullet);
    lines.join("\n")
}

/// Bodies of the `- ` bullets under `section`, without the prefix
pub fn bullets(content: &str, section: Section) -> Vec<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    let Some(start) = find_section(&lines, section) else {
        return Vec::new();
    };
    let end = next_section(&lines, start);

    lines[start + 1..end]
        .iter()
        .filter_map(|line| line.trim().strip_prefix("- "))
        .map(str::to_string)
        .collect()
}

/// Parsed entries under `section`
pub fn entries(content: &str, section: Section) -> Vec<Entry> {
    bullets(content, section)
        .iter()
        .map(|bullet| Entry::parse(bullet))
        .collect()
}
