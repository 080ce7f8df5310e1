/// The per-tick engine: scan, reconcile, read, notify.
use std::path::PathBuf;

use tracing::warn;

use crate::reader::{self, ReadError};
use crate::scanner;
use crate::sink::Sink;
use crate::tracker::TrackedSet;

/// Watches one directory. Call [`Monitor::tick`] once per polling
/// interval; all filesystem state lives here, the sink only renders.
pub struct Monitor {
    dir: PathBuf,
    tracked: TrackedSet,
}

impl Monitor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tracked: TrackedSet::default(),
        }
    }

    /// Run one polling tick against `sink`.
    ///
    /// Delivery order within a tick: disappearances, then appearances,
    /// then updates, each sorted by filename. A tick with no filesystem
    /// changes delivers nothing.
    ///
    /// A failed directory listing skips the tick entirely: logged,
    /// offsets and tracked files untouched, retried next interval.
    pub fn tick(&mut self, sink: &mut dyn Sink) {
        let snapshot = match scanner::scan(&self.dir) {
            Ok(names) => names,
            Err(e) => {
                warn!("scan skipped: {e}");
                return;
            }
        };

        let delta = self.tracked.reconcile(&snapshot);
        for name in &delta.disappeared {
            sink.on_disappeared(name);
        }
        for name in &delta.appeared {
            sink.on_appeared(name);
        }

        for name in self.tracked.names() {
            self.read_one(&name, sink);
        }
    }

    /// The presentation layer reports that `name`'s view gained focus;
    /// its content is now seen.
    pub fn focus_changed(&mut self, name: &str) {
        if let Some(file) = self.tracked.get_mut(name) {
            file.dirty = false;
        }
    }

    /// True if `name` is tracked and has unseen content.
    pub fn is_dirty(&self, name: &str) -> bool {
        self.tracked.get(name).is_some_and(|f| f.dirty)
    }

    /// Stored read offset for `name`, if tracked.
    pub fn offset(&self, name: &str) -> Option<u64> {
        self.tracked.get(name).map(|f| f.offset)
    }

    /// Tracked filenames in lexicographic order.
    pub fn tracked_names(&self) -> Vec<String> {
        self.tracked.names()
    }

    fn read_one(&mut self, name: &str, sink: &mut dyn Sink) {
        let path = self.dir.join(name);
        let Some(file) = self.tracked.get_mut(name) else {
            return;
        };

        let outcome = match reader::read_new(&path, name, file.offset) {
            Ok(outcome) => outcome,
            Err(ReadError::Vanished(_)) => {
                // Scan/read race; the next tick's scan evicts the file.
                warn!("{name}: vanished between scan and read");
                return;
            }
            Err(e) => {
                warn!("{e}");
                return;
            }
        };

        if outcome.truncated {
            warn!("{name}: shrank below stored offset, re-reading from start");
        }
        file.offset = outcome.offset;

        if outcome.fragment.is_empty() {
            return;
        }
        sink.on_updated(name, &outcome.fragment);
        if !sink.is_active(name) {
            if let Some(file) = self.tracked.get_mut(name) {
                file.dirty = true;
            }
        }
    }
}
