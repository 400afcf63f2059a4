// Library snapshot persistence
//
// A snapshot is a derived artifact: any failure to read it (missing, stale,
// corrupt, written by another format version) makes the caller rebuild the
// library from its sources.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wordguard_automaton::Dictionary;

use crate::ScreenError;
use crate::whitelist::Whitelist;

/// Snapshot layout version. Snapshots with another version are discarded.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Compiled library state: the dictionary (automaton and prefix index) and
/// the whitelist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub dictionary: Dictionary,
    pub whitelist: Whitelist,
}

impl Library {
    pub fn new(dictionary: Dictionary, whitelist: Whitelist) -> Self {
        Self {
            dictionary,
            whitelist,
        }
    }
}

/// On-disk layout of a snapshot, written from a borrowed library.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    library: &'a Library,
}

#[derive(Deserialize)]
struct SnapshotFile {
    version: u32,
    library: Library,
}

/// Storage for library snapshots.
pub trait LibraryStore {
    /// The stored library, or `None` if there is no usable snapshot.
    fn load(&self) -> Option<Library>;

    /// Persist `library`, replacing any previous snapshot.
    fn save(&self, library: &Library) -> Result<(), ScreenError>;

    /// Delete the stored snapshot. Returns `true` if none remains.
    fn clear(&self) -> bool;
}

/// Snapshot stored as a JSON file, expiring by modification time.
#[derive(Debug, Clone)]
pub struct FileLibraryStore {
    path: PathBuf,
    max_age: Option<Duration>,
}

impl FileLibraryStore {
    /// A store at `path`. Snapshots older than `max_age` are ignored; `None`
    /// keeps them forever.
    pub fn new(path: impl Into<PathBuf>, max_age: Option<Duration>) -> Self {
        Self {
            path: path.into(),
            max_age,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the snapshot file is older than the configured lifetime.
    pub fn is_stale(&self) -> bool {
        let Some(max_age) = self.max_age else {
            return false;
        };
        match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(modified) => modified.elapsed().is_ok_and(|age| age > max_age),
            Err(_) => true,
        }
    }

    fn read(&self) -> Result<Library, String> {
        let data = fs::read(&self.path).map_err(|e| e.to_string())?;
        let file: SnapshotFile = serde_json::from_slice(&data).map_err(|e| e.to_string())?;
        if file.version != SNAPSHOT_VERSION {
            return Err(format!(
                "snapshot version {} does not match {SNAPSHOT_VERSION}",
                file.version
            ));
        }
        Ok(file.library)
    }

    fn write(&self, version: u32, library: &Library) -> Result<(), ScreenError> {
        let system = |e: &dyn std::fmt::Display| {
            ScreenError::System(format!("cannot save snapshot to {}: {e}", self.path.display()))
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| system(&e))?;
        }
        let data = serde_json::to_vec(&SnapshotRef { version, library }).map_err(|e| system(&e))?;
        // Write beside the target and rename, so readers never see a partial file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data).map_err(|e| system(&e))?;
        fs::rename(&tmp, &self.path).map_err(|e| system(&e))?;
        debug!(path = %self.path.display(), "saved library snapshot");
        Ok(())
    }
}

impl LibraryStore for FileLibraryStore {
    fn load(&self) -> Option<Library> {
        if !self.path.is_file() {
            debug!(path = %self.path.display(), "no library snapshot");
            return None;
        }
        if self.is_stale() {
            debug!(path = %self.path.display(), "library snapshot expired");
            return None;
        }
        match self.read() {
            Ok(library) => {
                debug!(
                    path = %self.path.display(),
                    words = library.dictionary.len(),
                    "loaded library snapshot"
                );
                Some(library)
            }
            Err(reason) => {
                warn!(path = %self.path.display(), %reason, "ignoring unusable library snapshot");
                None
            }
        }
    }

    fn save(&self, library: &Library) -> Result<(), ScreenError> {
        self.write(SNAPSHOT_VERSION, library)
    }

    fn clear(&self) -> bool {
        if !self.path.exists() {
            return true;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot remove library snapshot");
                false
            }
        }
    }
}
