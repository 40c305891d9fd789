//! Utilities for loading RON files and watching directories for changes.
//!
//! Every data-driven registry in the crate (blocks, items, lang entries and
//! settings) is read through `load_ron_files`, and each of them can be
//! hot-reloaded through a `RonWatcher` that flips a shared flag when a file in
//! the watched directory is modified.

use bevy::log::warn;
use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// File-watcher resource for RON hot-reload.
#[derive(Resource)]
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Set to `true` by the OS watcher thread.
    pub dir: PathBuf,
    _watcher: Option<RecommendedWatcher>, // Kept alive for as long as the resource lives.
}

impl RonWatcher {
    /// Create a `RonWatcher` without an OS watcher behind it.
    ///
    /// Used as the fallback when the watcher cannot be created, so systems
    /// that poll it keep working and simply never see a change.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            dir: PathBuf::new(),
            _watcher: None,
        }
    }

    /// Return whether a change was observed since the last call and reset the flag.
    ///
    /// A poisoned mutex is recovered rather than propagated; the flag is a
    /// plain bool so the data behind it cannot be left half-written.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("ron watcher mutex for {} poisoned, recovering", self.dir.display());
                poisoned.into_inner()
            }
        };
        std::mem::replace(&mut *flag, false)
    }

    /// Mark the watched directory as changed.
    pub fn mark_changed(&self) {
        match self.changed.lock() {
            Ok(mut guard) => *guard = true,
            Err(poisoned) => *poisoned.into_inner() = true,
        }
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// Files are visited in file-name order so registries built from the result
/// are deterministic. Files that fail to parse are skipped with a warning.
///
/// # Arguments
/// * `path` - Directory path to scan for `.ron` files.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: impl AsRef<Path>) -> Vec<T> {
    let path = path.as_ref();
    let Ok(entries) = std::fs::read_dir(path) else {
        warn!("could not read data directory {}", path.display());
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    let mut items = Vec::with_capacity(files.len());
    for file in files {
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {e}", file.display());
                continue;
            }
        };
        match ron::from_str::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => warn!("failed to parse {}: {e}", file.display()),
        }
    }

    items
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or the watcher cannot be registered for the provided path.
pub fn setup_ron_watcher(path: impl AsRef<Path>) -> Result<RonWatcher, notify::Error> {
    let path = path.as_ref();
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = Arc::clone(&changed);
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let filter_path = watched_path.clone();

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    std::fs::canonicalize(p)
                        .unwrap_or_else(|_| p.clone())
                        .starts_with(&filter_path)
                });
                if relevant {
                    match changed_clone.lock() {
                        Ok(mut guard) => *guard = true,
                        Err(poisoned) => *poisoned.into_inner() = true,
                    }
                }
            }
            Err(e) => warn!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(RonWatcher {
        changed,
        dir: watched_path,
        _watcher: Some(watcher),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Entry {
        name: String,
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bonfires-ron-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_files_in_name_order_and_skips_broken_ones() {
        let dir = scratch_dir("order");
        std::fs::write(dir.join("b.ron"), "(name: \"second\")").unwrap();
        std::fs::write(dir.join("a.ron"), "(name: \"first\")").unwrap();
        std::fs::write(dir.join("c.ron"), "(name: ").unwrap();
        std::fs::write(dir.join("notes.txt"), "(name: \"ignored\")").unwrap();

        let entries: Vec<Entry> = load_ron_files(&dir);
        assert_eq!(
            entries,
            vec![Entry { name: "first".into() }, Entry { name: "second".into() }]
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let entries: Vec<Entry> = load_ron_files("does/not/exist");
        assert!(entries.is_empty());
    }

    #[test]
    fn stub_watcher_flag_resets_after_take() {
        let watcher = RonWatcher::stub();
        assert!(!watcher.take_changed());
        watcher.mark_changed();
        assert!(watcher.take_changed());
        assert!(!watcher.take_changed());
    }
}
