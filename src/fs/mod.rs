/// File system access for the dailies directory
///
/// Responsibilities:
/// - Day note paths (`<dir>/YYYY-MM-DD-daily.md`)
/// - Creating notes from the template on first write
/// - Appending entries in place
/// - Enumerating notes for search
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::calendar;
use crate::entry::{Entry, EntryKind};
use crate::error::DailyError;
use crate::markdown;

/// Day notes stored under one directory
pub struct DailyStore {
    root: PathBuf,
}

/// A day note found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFile {
    pub path: PathBuf,
    pub date: NaiveDate,
}

impl DailyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.root.join(calendar::file_name(date))
    }

    // ========================================================================
    // Reading and writing notes
    // ========================================================================

    /// Create the note for `date` from the template unless it already exists
    pub fn ensure(&self, date: NaiveDate) -> Result<PathBuf> {
        let path = self.path_for(date);
        if path.exists() {
            return Ok(path);
        }

        fs::create_dir_all(&self.root).map_err(|e| DailyError::io(&self.root, e))?;
        self.write_file_atomic(&path, markdown::template(date).as_bytes())?;
        info!(path = %path.display(), "created day note");
        Ok(path)
    }

    /// Note contents; `NoteNotFound` when there is no file for `date`
    pub fn read(&self, date: NaiveDate) -> Result<String> {
        let path = self.path_for(date);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DailyError::NoteNotFound { date }.into())
            }
            Err(e) => Err(DailyError::io(path, e).into()),
        }
    }

    pub fn write(&self, date: NaiveDate, content: &str) -> Result<PathBuf> {
        let path = self.path_for(date);
        self.write_file_atomic(&path, content.as_bytes())?;
        Ok(path)
    }

    /// Append `entry` under the section owned by `kind` in the note for `date`
    pub fn append(&self, date: NaiveDate, kind: EntryKind, entry: &Entry) -> Result<PathBuf> {
        self.ensure(date)?;
        let content = self.read(date)?;
        let updated = markdown::insert_entry(&content, kind.section(), entry);
        let path = self.write(date, &updated)?;

        info!(
            path = %path.display(),
            section = kind.section().name(),
            tags = %entry.tags.join(","),
            "appended entry"
        );
        Ok(path)
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// Every day note in the directory, newest first
    pub fn list(&self) -> Result<Vec<DayFile>> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "dailies directory does not exist yet");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        // notes are often symlinks into a synced vault
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1);
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if let Some(date) = calendar::date_from_file_name(&name) {
                files.push(DayFile {
                    path: entry.path().to_path_buf(),
                    date,
                });
            }
        }

        files.sort_by_key(|f| std::cmp::Reverse(f.date));
        Ok(files)
    }

    // ========================================================================
    // Atomic Operations
    // ========================================================================

    /// Write file atomically (write to temp, then rename)
    ///
    /// An existing symlink is resolved first so the link survives and its target
    /// receives the content with its permissions intact.
    fn write_file_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| DailyError::io(parent, e))?;
        }

        let temp_path = target.with_extension("md.tmp");
        let result = Self::write_and_rename(&temp_path, &target, content);
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn write_and_rename(temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .map_err(|e| DailyError::io(temp_path, e))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        if let Ok(meta) = fs::metadata(target) {
            file.set_permissions(meta.permissions())
                .map_err(|e| DailyError::io(temp_path, e))?;
        }

        file.sync_all().map_err(|e| DailyError::io(temp_path, e))?;
        drop(file);

        fs::rename(temp_path, target)
            .with_context(|| format!("Failed to rename temp file to: {}", target.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Section;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_path_for_date() {
        let store = DailyStore::new("/notes");
        assert_eq!(
            store.path_for(day(2026, 1, 26)),
            PathBuf::from("/notes/2026-01-26-daily.md")
        );
        assert_ne!(store.path_for(day(2026, 1, 26)), store.path_for(day(2026, 1, 27)));
    }

    #[test]
    fn test_ensure_creates_template_once() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        let date = day(2026, 1, 26);

        let path = store.ensure(date).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "edited by hand").unwrap();
        store.ensure(date).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "edited by hand");
    }

    #[test]
    fn test_ensure_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path().join("nested/dailies"));
        assert!(store.ensure(day(2026, 1, 26)).unwrap().exists());
    }

    #[test]
    fn test_read_missing_note_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        let err = store.read(day(2026, 1, 26)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DailyError>(),
            Some(DailyError::NoteNotFound { .. })
        ));
    }

    #[test]
    fn test_append_creates_file_with_all_sections() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        let date = day(2026, 1, 26);

        store
            .append(date, EntryKind::Block, &Entry::new("waiting on review", &[]))
            .unwrap();

        let content = store.read(date).unwrap();
        for section in Section::ALL {
            assert!(content.contains(section.header()), "missing {:?}", section);
        }
        assert_eq!(
            markdown::bullets(&content, Section::Blockers),
            vec!["waiting on review"]
        );
        assert!(markdown::bullets(&content, Section::Done).is_empty());
    }

    #[test]
    fn test_append_stores_normalized_tags() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        let date = day(2026, 1, 26);
        let tags = vec!["AWS".to_string(), "Deploy".to_string(), "aws".to_string()];

        store
            .append(date, EntryKind::Done, &Entry::new("Rolled out", &tags))
            .unwrap();

        let content = store.read(date).unwrap();
        assert!(content.contains("- Rolled out #tags: aws,deploy"));
        let entries = markdown::entries(&content, Section::Done);
        assert_eq!(entries[0].tags, vec!["aws", "deploy"]);
    }

    #[test]
    fn test_append_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        store
            .append(day(2026, 1, 26), EntryKind::Plan, &Entry::new("x", &[]))
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2026-01-26-daily.md"]);
    }

    #[test]
    fn test_list_sorted_newest_first_and_skips_foreign_files() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        store.ensure(day(2026, 1, 26)).unwrap();
        store.ensure(day(2026, 2, 3)).unwrap();
        store.ensure(day(2025, 12, 31)).unwrap();
        std::fs::write(temp.path().join("README.md"), "hi").unwrap();
        std::fs::write(temp.path().join("bad-date-daily.md"), "hi").unwrap();

        let dates: Vec<NaiveDate> = store.list().unwrap().into_iter().map(|f| f.date).collect();
        assert_eq!(dates, vec![day(2026, 2, 3), day(2026, 1, 26), day(2025, 12, 31)]);
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path());
        let date = day(2026, 1, 26);
        let blocker = store.path_for(date);
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        assert!(store.write(date, "content").is_err());
        assert!(!temp.path().join("2026-01-26-daily.md.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_note_is_listed_and_written_through() {
        use std::os::unix::fs::{PermissionsExt, symlink};

        let temp = TempDir::new().unwrap();
        let vault = TempDir::new().unwrap();
        let real = vault.path().join("real.md");
        std::fs::write(&real, markdown::template(day(2026, 1, 26))).unwrap();
        std::fs::set_permissions(&real, std::fs::Permissions::from_mode(0o600)).unwrap();

        let store = DailyStore::new(temp.path());
        let link = store.path_for(day(2026, 1, 26));
        symlink(&real, &link).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].date, day(2026, 1, 26));

        store
            .append(day(2026, 1, 26), EntryKind::Done, &Entry::new("synced", &[]))
            .unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let content = std::fs::read_to_string(&real).unwrap();
        assert_eq!(markdown::bullets(&content, Section::Done), vec!["synced"]);
        let mode = std::fs::metadata(&real).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!vault.path().join("real.md.tmp").exists());
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = DailyStore::new(temp.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }
}
