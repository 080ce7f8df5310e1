/// Tracked-file bookkeeping and snapshot reconciliation.
use std::collections::{BTreeMap, BTreeSet};

/// Monitoring state for one file in the watched directory.
#[derive(Debug, Clone)]
pub struct TrackedFile {
    /// Byte position one past the last byte delivered to the sink.
    /// Non-decreasing while the file is tracked, except for the
    /// truncation reset (see `reader`).
    pub offset: u64,
    /// True when content arrived while the file's view was not focused.
    pub dirty: bool,
}

impl TrackedFile {
    fn new() -> Self {
        Self {
            offset: 0,
            dirty: false,
        }
    }
}

/// All files currently known to the monitor, keyed by filename.
///
/// A BTreeMap keeps iteration in filename order, which is also the
/// notification delivery order.
#[derive(Debug, Default)]
pub struct TrackedSet {
    files: BTreeMap<String, TrackedFile>,
}

/// Filenames that entered or left the tracked set in one tick.
/// Both lists are sorted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Delta {
    pub appeared: Vec<String>,
    pub disappeared: Vec<String>,
}

impl TrackedSet {
    /// Diff the set against a sorted snapshot of present filenames and
    /// apply the result: appeared files start fresh at offset 0, dirty
    /// false; disappeared files are dropped entirely, so a later
    /// reappearance is a brand-new file.
    pub fn reconcile(&mut self, snapshot: &[String]) -> Delta {
        let present: BTreeSet<&str> = snapshot.iter().map(String::as_str).collect();

        let disappeared: Vec<String> = self
            .files
            .keys()
            .filter(|name| !present.contains(name.as_str()))
            .cloned()
            .collect();
        for name in &disappeared {
            self.files.remove(name);
        }

        let appeared: Vec<String> = snapshot
            .iter()
            .filter(|name| !self.files.contains_key(*name))
            .cloned()
            .collect();
        for name in &appeared {
            self.files.insert(name.clone(), TrackedFile::new());
        }

        Delta {
            appeared,
            disappeared,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TrackedFile> {
        self.files.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TrackedFile> {
        self.files.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Tracked filenames in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
