//! Row ingestion and stable row identity

use uuid::Uuid;

/// Stable identity for a row, assigned once at ingestion.
///
/// Keys are either supplied by the caller (a record id) or synthesized when
/// the backing data has none. Either way they survive filtering and
/// re-sorting: derivations reorder key/row pairs, they never re-key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowKey(Uuid);

impl RowKey {
    /// Wraps a caller-supplied id.
    pub fn from_id(id: Uuid) -> Self {
        Self(id)
    }

    /// Synthesizes a fresh key.
    pub fn synthesize() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying id.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An ingested row collection with per-row identity and a revision counter.
///
/// The revision is bumped whenever the backing rows change, so derived views
/// can tell at a glance whether their inputs moved.
#[derive(Debug, Clone)]
pub struct RowSet<R> {
    entries: Vec<(RowKey, R)>,
    revision: u64,
}

impl<R> RowSet<R> {
    /// Creates an empty row set.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            revision: 0,
        }
    }

    /// Ingests rows, synthesizing a key for every row.
    pub fn synthesized(rows: Vec<R>) -> Self {
        Self {
            entries: rows
                .into_iter()
                .map(|r| (RowKey::synthesize(), r))
                .collect(),
            revision: 0,
        }
    }

    /// Ingests rows, keying each by its own id where one exists.
    ///
    /// Rows for which `id_of` returns `None` get a synthesized key instead.
    pub fn with_ids(rows: Vec<R>, id_of: impl Fn(&R) -> Option<Uuid>) -> Self {
        Self {
            entries: rows
                .into_iter()
                .map(|r| {
                    let key = match id_of(&r) {
                        Some(id) => RowKey::from_id(id),
                        None => RowKey::synthesize(),
                    };
                    (key, r)
                })
                .collect(),
            revision: 0,
        }
    }

    /// Replaces the backing rows, re-keying and bumping the revision.
    pub fn replace(&mut self, rows: Vec<R>, id_of: impl Fn(&R) -> Option<Uuid>) {
        let revision = self.revision + 1;
        *self = Self::with_ids(rows, id_of);
        self.revision = revision;
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the current revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the entry at the given position.
    pub fn entry(&self, index: usize) -> Option<&(RowKey, R)> {
        self.entries.get(index)
    }

    /// Iterates over key/row pairs in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &(RowKey, R)> {
        self.entries.iter()
    }
}

impl<R> Default for RowSet<R> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_keys_are_distinct() {
        let set = RowSet::synthesized(vec!["a", "b", "c"]);
        let keys: Vec<RowKey> = set.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), 3);
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
    }

    #[test]
    fn test_supplied_ids_are_kept() {
        let id = Uuid::new_v4();
        let set = RowSet::with_ids(vec![(id, "widget")], |(id, _)| Some(*id));
        assert_eq!(set.entry(0).map(|(k, _)| k.as_uuid()), Some(id));
    }

    #[test]
    fn test_replace_bumps_revision() {
        let mut set = RowSet::synthesized(vec![1, 2]);
        assert_eq!(set.revision(), 0);
        set.replace(vec![3], |_| None);
        assert_eq!(set.revision(), 1);
        assert_eq!(set.len(), 1);
    }
}
