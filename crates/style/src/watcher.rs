//! Hot reload: notices when the style file changes on disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::error::Result;

/// Watches one file through its parent directory.
///
/// Editors often save by writing a new file and renaming it over the old one,
/// which drops a watch placed on the file itself. Watching the directory keeps
/// seeing those saves.
pub struct StyleWatcher {
    path: PathBuf,
    file_name: Option<OsString>,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl StyleWatcher {
    pub fn new(path: &Path) -> Result<Self> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(dir = %dir.display(), "watching style directory");
        Ok(Self {
            path: path.to_path_buf(),
            file_name: path.file_name().map(OsString::from),
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn touches_file(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event
            .paths
            .iter()
            .any(|p| p.file_name().map(OsString::from) == self.file_name)
    }

    /// Drain pending events without blocking. True when any of them touched the file.
    pub fn check_modified(&self) -> bool {
        let mut modified = false;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => modified |= self.touches_file(&event),
                Ok(Err(err)) => warn!(error = %err, "style watcher error"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("style watcher stopped");
                    break;
                }
            }
        }
        modified
    }
}
