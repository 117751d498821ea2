//! Rebuild on source changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::discovery::is_svg;
use crate::error::{IconsheetError, Result};

/// Quiet period after the last event before a rebuild fires.
pub const DEBOUNCE: Duration = Duration::from_millis(150);

/// Watches an input directory for SVG changes.
pub struct IconWatcher {
    // Dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    receiver: Receiver<PathBuf>,
}

impl IconWatcher {
    /// Start watching `root` recursively.
    pub fn new(root: &Path) -> Result<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    for path in relevant_paths(&event) {
                        let _ = tx.send(path);
                    }
                }
            },
            notify::Config::default(),
        )
        .map_err(|e| IconsheetError::Watch {
            message: e.to_string(),
        })?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| IconsheetError::Watch {
                message: format!("Failed to watch {}: {}", root.display(), e),
            })?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Block until a batch of changes settles.
    ///
    /// Returns the changed paths, or `None` once the watcher has shut down.
    pub fn next_batch(&self) -> Option<Vec<PathBuf>> {
        collect_batch(&self.receiver, DEBOUNCE)
    }
}

/// Wait for one path, then keep draining until `debounce` passes with no
/// new events. Paths are deduplicated in arrival order.
fn collect_batch(receiver: &Receiver<PathBuf>, debounce: Duration) -> Option<Vec<PathBuf>> {
    let first = receiver.recv().ok()?;
    let mut batch = vec![first];

    loop {
        match receiver.recv_timeout(debounce) {
            Ok(path) => {
                if !batch.contains(&path) {
                    batch.push(path);
                }
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => return Some(batch),
        }
    }
}

/// SVG paths touched by a create, modify, or remove event.
fn relevant_paths(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => event
            .paths
            .iter()
            .filter(|p| is_svg(p))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, RemoveKind};
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn test_relevant_paths_filters_svg() {
        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("icons/new.svg"))
            .add_path(PathBuf::from("icons/.DS_Store"));

        assert_eq!(relevant_paths(&event), vec![PathBuf::from("icons/new.svg")]);
    }

    #[test]
    fn test_relevant_paths_includes_removals() {
        let event = Event::new(EventKind::Remove(RemoveKind::File)).add_path(PathBuf::from("gone.svg"));
        assert_eq!(relevant_paths(&event).len(), 1);
    }

    #[test]
    fn test_relevant_paths_ignores_access() {
        let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("read.svg"));
        assert!(relevant_paths(&event).is_empty());
    }

    #[test]
    fn test_collect_batch_dedups_until_quiet() {
        let (tx, rx) = channel();
        tx.send(PathBuf::from("a.svg")).unwrap();
        tx.send(PathBuf::from("a.svg")).unwrap();
        tx.send(PathBuf::from("b.svg")).unwrap();

        // The sender stays alive, so only the quiet period ends the batch
        let batch = collect_batch(&rx, Duration::from_millis(20)).unwrap();
        assert_eq!(batch, vec![PathBuf::from("a.svg"), PathBuf::from("b.svg")]);

        tx.send(PathBuf::from("c.svg")).unwrap();
        assert_eq!(collect_batch(&rx, Duration::from_millis(20)).unwrap(), vec![PathBuf::from("c.svg")]);
    }

    #[test]
    fn test_collect_batch_waits_for_late_events() {
        let (tx, rx) = channel();
        tx.send(PathBuf::from("a.svg")).unwrap();

        let late = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            tx.send(PathBuf::from("b.svg")).unwrap();
        });

        let batch = collect_batch(&rx, Duration::from_millis(500)).unwrap();
        late.join().unwrap();

        assert_eq!(batch, vec![PathBuf::from("a.svg"), PathBuf::from("b.svg")]);
    }

    #[test]
    fn test_collect_batch_after_shutdown() {
        let (tx, rx) = channel::<PathBuf>();
        drop(tx);

        assert_eq!(collect_batch(&rx, Duration::from_millis(20)), None);
    }
}
