//! Store opener that counts opens per path.

use balmorel_data::{Result, StoreOpener};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Wraps an opener and counts `open` calls. Clones share the same counts.
#[derive(Debug, Clone)]
pub struct CountingOpener<O> {
    inner: O,
    counts: Arc<Mutex<HashMap<PathBuf, usize>>>,
}

impl<O> CountingOpener<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn opens(&self, path: &Path) -> usize {
        self.counts
            .lock()
            .expect("counts lock poisoned")
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_opens(&self) -> usize {
        self.counts
            .lock()
            .expect("counts lock poisoned")
            .values()
            .sum()
    }

    /// Paths opened at least once.
    pub fn opened_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .counts
            .lock()
            .expect("counts lock poisoned")
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }

    pub fn reset(&self) {
        self.counts.lock().expect("counts lock poisoned").clear();
    }
}

impl<O: StoreOpener> StoreOpener for CountingOpener<O> {
    type Store = O::Store;

    fn open(&self, path: &Path) -> Result<Self::Store> {
        *self
            .counts
            .lock()
            .expect("counts lock poisoned")
            .entry(path.to_path_buf())
            .or_insert(0) += 1;
        self.inner.open(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balmorel_data::{MemoryOpener, MemoryStore};

    #[test]
    fn test_counts_shared_between_clones() {
        let opener = CountingOpener::new(
            MemoryOpener::new().with_store("/a.gdx", MemoryStore::new()),
        );
        let clone = opener.clone();

        clone.open(Path::new("/a.gdx")).unwrap();
        clone.open(Path::new("/a.gdx")).unwrap();
        assert!(opener.open(Path::new("/b.gdx")).is_err());

        assert_eq!(opener.opens(Path::new("/a.gdx")), 2);
        assert_eq!(opener.opens(Path::new("/b.gdx")), 1);
        assert_eq!(opener.total_opens(), 3);

        opener.reset();
        assert_eq!(clone.total_opens(), 0);
    }
}
