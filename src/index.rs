//! Fingerprint buckets built during the walk.

use std::collections::HashMap;
use std::path::PathBuf;

/// Maps each fingerprint to every path that produced it.
///
/// Paths keep their insertion order inside a bucket: the first path
/// registered under a fingerprint is the original, every later one is a
/// duplicate of it. A bucket of size 1 has no duplicates. The index lives
/// for a single run; nothing persists.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    buckets: HashMap<String, Vec<PathBuf>>,
    processed: usize,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` hashed to `fingerprint`, creating the bucket if
    /// absent. O(1) amortized; a full run stays O(images).
    pub fn register(&mut self, fingerprint: String, path: PathBuf) {
        self.buckets.entry(fingerprint).or_default().push(path);
        self.processed += 1;
    }

    /// Number of images successfully hashed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Consume the index, keeping only buckets with more than one member.
    /// Bucket order is unspecified; paths within each bucket keep discovery
    /// order.
    pub fn into_duplicate_groups(self) -> Vec<Vec<PathBuf>> {
        self.buckets
            .into_values()
            .filter(|paths| paths.len() > 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn first_registered_path_leads_its_bucket() {
        let mut index = DuplicateIndex::new();
        index.register("h1".into(), path("a.jpg"));
        index.register("h1".into(), path("b.jpg"));
        index.register("h2".into(), path("c.jpg"));

        assert_eq!(index.processed(), 3);
        let groups = index.into_duplicate_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![path("a.jpg"), path("b.jpg")]);
    }

    #[test]
    fn singleton_buckets_are_not_duplicates() {
        let mut index = DuplicateIndex::new();
        index.register("h1".into(), path("a.jpg"));
        index.register("h2".into(), path("b.jpg"));

        assert_eq!(index.processed(), 2);
        assert!(index.into_duplicate_groups().is_empty());
    }

    #[test]
    fn insertion_order_survives_many_registrations() {
        let mut index = DuplicateIndex::new();
        for name in ["1.png", "2.png", "3.png", "4.png"] {
            index.register("same".into(), path(name));
        }

        let groups = index.into_duplicate_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0],
            vec![path("1.png"), path("2.png"), path("3.png"), path("4.png")]
        );
    }

    #[test]
    fn counter_tracks_registrations_not_buckets() {
        let mut index = DuplicateIndex::new();
        assert_eq!(index.processed(), 0);
        index.register("h1".into(), path("a.jpg"));
        index.register("h1".into(), path("b.jpg"));
        assert_eq!(index.processed(), 2);
    }
}
