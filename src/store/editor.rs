//! Lock-serialized mutation of the backing files.
//!
//! All operations re-read the backing file under the lock; nothing is
//! cached. `next_id` followed by `insert_*` is not atomic as a pair: another
//! writer may take the ID in between, so inserts re-validate and fail with
//! [`StoreError::IdCollision`] instead of overwriting. Callers retry with a
//! fresh ID.

use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;

use super::atomic::atomic_write;
use super::lock::FileLock;
use super::models::{starter_content, DecisionFields, IdeaFields, IssueFields};
use super::paths::StorePaths;
use super::{RecordKind, StoreError};

/// A store over one resolved set of backing files.
pub struct Store {
    paths: StorePaths,
}

impl Store {
    /// Creates a store over the given backing files.
    pub fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// The resolved backing-file paths.
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Creates the backing file for `kind` with starter content.
    ///
    /// Returns `false` without touching anything when the file already
    /// exists. Parent directories are created as needed.
    pub fn init_file(&self, kind: RecordKind) -> Result<bool, StoreError> {
        let path = self.paths.for_kind(kind);
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
        }
        atomic_write(path, &starter_content(kind, &today()))
            .map_err(|e| io_error(path, e))?;
        Ok(true)
    }

    /// Returns the next available ID for `kind`, e.g. "IDEA-042".
    ///
    /// Scans every `<PREFIX>-<digits>` substring in the file, including the
    /// metadata hint, under the exclusive lock. Fails with
    /// [`StoreError::NotFound`] when the backing file is absent.
    pub fn next_id(&self, kind: RecordKind) -> Result<String, StoreError> {
        let path = self.paths.for_kind(kind);
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        let content = {
            let _lock = FileLock::acquire_exclusive(path).map_err(|e| io_error(path, e))?;
            read_file(path)?
        };

        let prefix = kind.prefix();
        let pattern = Regex::new(&format!(r"{prefix}-(\d+)")).expect("valid ID pattern");
        let highest = pattern
            .captures_iter(&content)
            .filter_map(|caps| caps[1].parse::<u64>().ok())
            .max();

        let next = highest.map_or(1, |n| n + 1);
        Ok(format!("{prefix}-{next:03}"))
    }

    /// Reports whether `id` already exists in the backing file for `kind`.
    ///
    /// Matching is word-boundary exact: "IDEA-1" does not match inside
    /// "IDEA-10". On any read fault this returns `true`: assuming a
    /// collision is safer than risking an overwrite. That fail-closed bias
    /// is deliberately asymmetric with the raising read paths.
    pub fn id_exists(&self, kind: RecordKind, id: &str) -> bool {
        let path = self.paths.for_kind(kind);
        if !path.exists() {
            return false;
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(id)))
                    .expect("valid ID pattern");
                pattern.is_match(&content)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to check ID collision, assuming it exists"
                );
                true
            }
        }
    }

    /// Inserts a new idea record under the "## Active Ideas" anchor.
    pub fn insert_idea(&self, id: &str, fields: &IdeaFields) -> Result<(), StoreError> {
        let date = today();
        self.insert_block(RecordKind::Ideas, id, &fields.format_block(id, &date), &date)
    }

    /// Inserts a new issue record under the "## Open Issues" anchor.
    pub fn insert_issue(&self, id: &str, fields: &IssueFields) -> Result<(), StoreError> {
        let date = today();
        self.insert_block(RecordKind::Issues, id, &fields.format_block(id, &date), &date)
    }

    /// Inserts a new decision record under the "## Decisions" anchor.
    pub fn insert_decision(&self, id: &str, fields: &DecisionFields) -> Result<(), StoreError> {
        let date = today();
        self.insert_block(
            RecordKind::Decisions,
            id,
            &fields.format_block(id, &date),
            &date,
        )
    }

    /// The shared insert sequence: collision re-check, then the whole
    /// read-modify-write-replace under one lock acquisition.
    fn insert_block(
        &self,
        kind: RecordKind,
        id: &str,
        block: &str,
        date: &str,
    ) -> Result<(), StoreError> {
        if self.id_exists(kind, id) {
            return Err(StoreError::IdCollision(id.to_string()));
        }

        let path = self.paths.for_kind(kind);
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        // Held across read, splice, metadata rewrite, and atomic replace.
        let _lock = FileLock::acquire_exclusive(path).map_err(|e| io_error(path, e))?;

        let content = read_file(path)?;

        // Re-validate against the locked read: the unlocked check above can
        // race a writer that took the same ID first.
        let id_re =
            Regex::new(&format!(r"\b{}\b", regex::escape(id))).expect("valid ID pattern");
        if id_re.is_match(&content) {
            return Err(StoreError::IdCollision(id.to_string()));
        }

        let anchor = kind.anchor();
        if !content.contains(anchor) {
            return Err(StoreError::MalformedFile {
                path: path.to_path_buf(),
                anchor: anchor.to_string(),
            });
        }

        let spliced = content.replacen(
            &format!("{anchor}\n"),
            &format!("{anchor}\n{block}"),
            1,
        );

        let updated = match kind {
            RecordKind::Ideas => update_counted_metadata(&spliced, "Total Ideas", kind, id, date),
            RecordKind::Decisions => {
                update_counted_metadata(&spliced, "Total Decisions", kind, id, date)
            }
            RecordKind::Issues => update_issue_metadata(&spliced, date),
        };

        atomic_write(path, &updated).map_err(|e| io_error(path, e))
    }
}

/// Today's date as YYYY-MM-DD.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a backing file, mapping faults to the store taxonomy.
fn read_file(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => StoreError::Permission {
            path: path.to_path_buf(),
            source: e,
        },
        _ => io_error(path, e),
    })?;

    String::from_utf8(bytes).map_err(|_| StoreError::Encoding(path.to_path_buf()))
}

/// Metadata maintenance for ideas and decisions: bump the running total,
/// advance the next-available hint past the inserted ID, and refresh the
/// last-updated date. A file without the metadata header is left as is.
fn update_counted_metadata(
    content: &str,
    label: &str,
    kind: RecordKind,
    new_id: &str,
    date: &str,
) -> String {
    let prefix = kind.prefix();

    let total_re = Regex::new(&format!(r"\*\*{label}:\*\* (\d+)")).expect("valid metadata pattern");
    let Some(caps) = total_re.captures(content) else {
        return content.to_string();
    };
    let Ok(current_total) = caps[1].parse::<u64>() else {
        return content.to_string();
    };
    let Some(id_num) = new_id
        .split('-')
        .nth(1)
        .and_then(|n| n.parse::<u64>().ok())
    else {
        return content.to_string();
    };

    let new_total = current_total + 1;
    let next_hint = format!("{prefix}-{:03}", id_num + 1);

    let content = replace_last_updated(content, date);

    let line_re = Regex::new(&format!(
        r"\*\*{label}:\*\* \d+ \(next available: {prefix}-\d+\)"
    ))
    .expect("valid metadata pattern");
    line_re
        .replace(
            &content,
            format!("**{label}:** {new_total} (next available: {next_hint})"),
        )
        .into_owned()
}

/// Metadata maintenance for issues: recount the `| OPEN |` status markers
/// across the whole file rather than incrementing a counter. This strategy
/// intentionally differs from the idea/decision running total.
fn update_issue_metadata(content: &str, date: &str) -> String {
    let open_count = content.matches("| OPEN |").count();

    let content = replace_last_updated(content, date);

    let summary_re = Regex::new(r"\*\*Summary:\*\* \d+ Open").expect("valid metadata pattern");
    summary_re
        .replace(&content, format!("**Summary:** {open_count} Open"))
        .into_owned()
}

fn replace_last_updated(content: &str, date: &str) -> String {
    let re = Regex::new(r"\*\*Last Updated:\*\* \d{4}-\d{2}-\d{2}").expect("valid metadata pattern");
    re.replace(content, format!("**Last Updated:** {date}"))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::paths::Scope;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn project_store() -> (Store, TempDir) {
        let dir = tempdir().unwrap();
        let paths = StorePaths::resolve(
            &Scope::Project(dir.path().to_path_buf()),
            Path::new("/unused"),
        );
        (Store::new(paths), dir)
    }

    fn write_ideas(store: &Store, content: &str) -> PathBuf {
        let path = store.paths().for_kind(RecordKind::Ideas).to_path_buf();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_next_id_missing_file_is_not_found() {
        let (store, _dir) = project_store();
        let err = store.next_id(RecordKind::Ideas).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_next_id_no_matches_starts_at_one() {
        let (store, _dir) = project_store();
        write_ideas(&store, "# Ideas\n\n## Active Ideas\n");

        assert_eq!(store.next_id(RecordKind::Ideas).unwrap(), "IDEA-001");
    }

    #[test]
    fn test_next_id_returns_max_plus_one_regardless_of_order() {
        let (store, _dir) = project_store();
        write_ideas(
            &store,
            "## Active Ideas\n### IDEA-003: b\n### IDEA-007: c\n### IDEA-001: a\n",
        );

        assert_eq!(store.next_id(RecordKind::Ideas).unwrap(), "IDEA-008");
    }

    #[test]
    fn test_next_id_includes_metadata_hint_in_scan() {
        // The next-available hint is itself a matching substring; the scan
        // deliberately includes it, so a hinted file allocates past it.
        let (store, _dir) = project_store();
        write_ideas(
            &store,
            "**Total Ideas:** 1 (next available: IDEA-005)\n\n## Active Ideas\n### IDEA-004: a\n",
        );

        assert_eq!(store.next_id(RecordKind::Ideas).unwrap(), "IDEA-006");
    }

    #[test]
    fn test_next_id_pads_to_three_digits() {
        let (store, _dir) = project_store();
        write_ideas(&store, "## Active Ideas\n### IDEA-007: a\n");
        assert_eq!(store.next_id(RecordKind::Ideas).unwrap(), "IDEA-008");

        write_ideas(&store, "## Active Ideas\n### IDEA-999: a\n");
        assert_eq!(store.next_id(RecordKind::Ideas).unwrap(), "IDEA-1000");
    }

    #[test]
    fn test_id_exists_word_boundary() {
        let (store, _dir) = project_store();
        write_ideas(&store, "## Active Ideas\n### IDEA-10: a\n### IDEA-100: b\n");

        assert!(!store.id_exists(RecordKind::Ideas, "IDEA-1"));
        assert!(store.id_exists(RecordKind::Ideas, "IDEA-10"));
        assert!(store.id_exists(RecordKind::Ideas, "IDEA-100"));
    }

    #[test]
    fn test_id_exists_missing_file_is_false() {
        let (store, _dir) = project_store();
        assert!(!store.id_exists(RecordKind::Ideas, "IDEA-001"));
    }

    #[test]
    fn test_id_exists_fails_closed_on_read_fault() {
        let (store, _dir) = project_store();
        let path = store.paths().for_kind(RecordKind::Ideas).to_path_buf();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        // Invalid UTF-8 makes the read fail; the check assumes a collision.
        assert!(store.id_exists(RecordKind::Ideas, "IDEA-001"));
    }

    #[test]
    fn test_init_file_then_insert_idea() {
        let (store, _dir) = project_store();
        assert!(store.init_file(RecordKind::Ideas).unwrap());
        assert!(!store.init_file(RecordKind::Ideas).unwrap(), "second init is a no-op");

        let id = store.next_id(RecordKind::Ideas).unwrap();
        let fields = IdeaFields {
            title: "Automate capture".to_string(),
            category: "Automation".to_string(),
            description: "Wire the analyzer to the store.".to_string(),
            ..Default::default()
        };
        store.insert_idea(&id, &fields).unwrap();

        let content = fs::read_to_string(store.paths().for_kind(RecordKind::Ideas)).unwrap();
        assert!(content.contains(&format!("### {id}: Automate capture")));
        assert!(content.contains("**Total Ideas:** 1"));
        assert!(store.id_exists(RecordKind::Ideas, &id));
    }

    #[test]
    fn test_insert_splices_directly_after_anchor() {
        let (store, _dir) = project_store();
        store.init_file(RecordKind::Ideas).unwrap();

        let first = store.next_id(RecordKind::Ideas).unwrap();
        store
            .insert_idea(&first, &IdeaFields { title: "first".into(), ..Default::default() })
            .unwrap();
        let second = store.next_id(RecordKind::Ideas).unwrap();
        store
            .insert_idea(&second, &IdeaFields { title: "second".into(), ..Default::default() })
            .unwrap();

        let content = fs::read_to_string(store.paths().for_kind(RecordKind::Ideas)).unwrap();
        let anchor_pos = content.find("## Active Ideas").unwrap();
        let second_pos = content.find(&format!("### {second}:")).unwrap();
        let first_pos = content.find(&format!("### {first}:")).unwrap();
        // Newest record sits closest to the anchor.
        assert!(anchor_pos < second_pos && second_pos < first_pos);
    }

    #[test]
    fn test_insert_collision_names_the_id() {
        let (store, _dir) = project_store();
        store.init_file(RecordKind::Ideas).unwrap();
        let fields = IdeaFields { title: "t".into(), ..Default::default() };
        store.insert_idea("IDEA-002", &fields).unwrap();

        let err = store.insert_idea("IDEA-002", &fields).unwrap_err();
        match err {
            StoreError::IdCollision(id) => assert_eq!(id, "IDEA-002"),
            other => panic!("expected IdCollision, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_missing_anchor_changes_nothing() {
        let (store, _dir) = project_store();
        let original = "# Ideas\n\nNo anchor here.\n";
        let path = write_ideas(&store, original);

        let err = store
            .insert_idea("IDEA-001", &IdeaFields { title: "t".into(), ..Default::default() })
            .unwrap_err();

        match err {
            StoreError::MalformedFile { anchor, .. } => assert_eq!(anchor, "## Active Ideas"),
            other => panic!("expected MalformedFile, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_idea_metadata_increments_and_advances_hint() {
        let (store, _dir) = project_store();
        store.init_file(RecordKind::Ideas).unwrap();

        let id = store.next_id(RecordKind::Ideas).unwrap();
        store
            .insert_idea(&id, &IdeaFields { title: "t".into(), ..Default::default() })
            .unwrap();

        let content = fs::read_to_string(store.paths().for_kind(RecordKind::Ideas)).unwrap();
        let id_num: u64 = id.split('-').nth(1).unwrap().parse().unwrap();
        let hint = format!("next available: IDEA-{:03}", id_num + 1);
        assert!(content.contains(&hint), "hint must equal max+1, content:\n{content}");
        assert!(content.contains(&format!("**Last Updated:** {}", today())));
    }

    #[test]
    fn test_issue_metadata_recounts_open_markers() {
        // Issues recount `| OPEN |` across the file instead of incrementing
        // a running total; the divergence from ideas is intentional.
        let (store, _dir) = project_store();
        store.init_file(RecordKind::Issues).unwrap();

        let fields = IssueFields { title: "broken sync".into(), ..Default::default() };
        store.insert_issue("ISSUE-001", &fields).unwrap();
        store.insert_issue("ISSUE-002", &fields).unwrap();

        let content = fs::read_to_string(store.paths().for_kind(RecordKind::Issues)).unwrap();
        assert!(content.contains("**Summary:** 2 Open"), "content:\n{content}");
        assert!(!content.contains("Total Issues"));
    }

    #[test]
    fn test_insert_decision_follows_counted_strategy() {
        let (store, _dir) = project_store();
        store.init_file(RecordKind::Decisions).unwrap();

        let id = store.next_id(RecordKind::Decisions).unwrap();
        store
            .insert_decision(
                &id,
                &DecisionFields {
                    title: "Adopt markdown logs".into(),
                    decision: "Keep plain files.".into(),
                    ..Default::default()
                },
            )
            .unwrap();

        let content = fs::read_to_string(store.paths().for_kind(RecordKind::Decisions)).unwrap();
        assert!(content.contains(&format!("### {id}: Adopt markdown logs")));
        assert!(content.contains("**Total Decisions:** 1"));
    }

    #[test]
    fn test_insert_into_file_without_metadata_header_still_works() {
        let (store, _dir) = project_store();
        write_ideas(&store, "## Active Ideas\n");

        store
            .insert_idea("IDEA-001", &IdeaFields { title: "t".into(), ..Default::default() })
            .unwrap();

        let content = fs::read_to_string(store.paths().for_kind(RecordKind::Ideas)).unwrap();
        assert!(content.contains("### IDEA-001: t"));
    }

    #[test]
    fn test_insert_missing_file_is_not_found() {
        let (store, _dir) = project_store();
        let err = store
            .insert_issue("ISSUE-001", &IssueFields::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
