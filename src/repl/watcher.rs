use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watches one memory file; notify's internal threads send raw events to a channel.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    watched: Option<PathBuf>,
}

impl FileWatcher {
    /// Create a new file watcher that sends events to the provided channel
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // Receiver dropped means the REPL is shutting down
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            watched: None,
        })
    }

    /// Watch `path`, replacing any file watched before
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<PathBuf> {
        let path = std::fs::canonicalize(path.as_ref())?;
        if let Some(previous) = self.watched.take() {
            self.watcher.unwatch(&previous)?;
        }
        self.watcher.watch(&path, RecursiveMode::NonRecursive)?;
        self.watched = Some(path.clone());
        Ok(path)
    }

    /// Stop watching the current file
    pub fn unwatch(&mut self) -> notify::Result<()> {
        match self.watched.take() {
            Some(path) => self.watcher.unwatch(&path),
            None => Ok(()),
        }
    }

    pub fn watched(&self) -> Option<&Path> {
        self.watched.as_deref()
    }

    /// Whether `event` means the watched file should be reloaded
    pub fn is_reload(&self, event: &Event) -> bool {
        match &self.watched {
            Some(watched) => is_reload_event(event, watched),
            None => false,
        }
    }
}

fn is_reload_event(event: &Event, watched: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p == watched || p.file_name() == watched.file_name())
}
