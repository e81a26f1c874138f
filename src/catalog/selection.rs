//! The ordered set of selected artworks.

use std::collections::HashSet;

use crate::api::ArtworkRecord;

/// Selected artworks in selection order, keyed by artwork id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    records: Vec<ArtworkRecord>,
    ids: HashSet<u64>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from records, dropping repeated ids.
    pub fn from_records(records: impl IntoIterator<Item = ArtworkRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.insert(record);
        }
        set
    }

    /// Number of selected artworks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the artwork with `id` is selected.
    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Append a record. Returns `false` if its id was already selected.
    pub fn insert(&mut self, record: ArtworkRecord) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Remove the artwork with `id`. Returns `true` if it was selected.
    pub fn remove(&mut self, id: u64) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.records.retain(|r| r.id != id);
        true
    }

    /// Flip the selection state of `record`. Returns the new state.
    pub fn toggle(&mut self, record: &ArtworkRecord) -> bool {
        if self.remove(record.id) {
            false
        } else {
            self.insert(record.clone())
        }
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
    }

    /// Selected records in order.
    pub fn records(&self) -> &[ArtworkRecord] {
        &self.records
    }

    /// Iterate selected records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ArtworkRecord> {
        self.records.iter()
    }

    /// Consume the set, yielding the ordered records.
    pub fn into_records(self) -> Vec<ArtworkRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a ArtworkRecord;
    type IntoIter = std::slice::Iter<'a, ArtworkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::test_record;

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut set = SelectionSet::new();
        assert!(set.insert(test_record(1)));
        assert!(!set.insert(test_record(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_records_keeps_order() {
        let set = SelectionSet::from_records(vec![
            test_record(3),
            test_record(1),
            test_record(3),
            test_record(2),
        ]);
        let ids: Vec<u64> = set.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_toggle() {
        let mut set = SelectionSet::new();
        let record = test_record(9);
        assert!(set.toggle(&record));
        assert!(set.contains(9));
        assert!(!set.toggle(&record));
        assert!(!set.contains(9));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set = SelectionSet::from_records((1..=4).map(test_record));
        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert_eq!(set.len(), 3);

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));
    }
}
