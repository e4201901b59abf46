use crate::record::SelectedRecord;

/// Cardinality policy for the selection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multi,
}

/// Ordered set of currently selected records. Ids are unique; single mode
/// never holds more than one record.
#[derive(Debug)]
pub struct SelectionStore {
    mode: SelectionMode,
    records: Vec<SelectedRecord>,
}

impl SelectionStore {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Add a record. Single mode replaces the current selection wholesale;
    /// multi mode ignores ids that are already present.
    pub fn add(&mut self, record: SelectedRecord) {
        match self.mode {
            SelectionMode::Single => self.records = vec![record],
            SelectionMode::Multi => {
                if !self.contains(&record.id) {
                    self.records.push(record);
                }
            }
        }
        self.enforce_cardinality();
    }

    /// Remove by id. Single mode treats any removal as clearing the whole
    /// selection, whatever id was passed.
    pub fn remove(&mut self, id: &str) {
        match self.mode {
            SelectionMode::Single => self.records.clear(),
            SelectionMode::Multi => self.records.retain(|r| r.id != id),
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn records(&self) -> &[SelectedRecord] {
        &self.records
    }

    /// Comma-joined ids in selection order; "" when empty.
    pub fn joined_ids(&self) -> String {
        self.records
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Runs after every mutation: single mode keeps only the most recently
    // added record, however the store got over-full.
    fn enforce_cardinality(&mut self) {
        if self.mode == SelectionMode::Single && self.records.len() > 1 {
            let last = self.records.len() - 1;
            self.records.drain(..last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(id: &str, name: &str) -> SelectedRecord {
        SelectedRecord {
            id: id.to_string(),
            name: name.to_string(),
            additional_info: None,
        }
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut store = SelectionStore::new(SelectionMode::Single);
        store.add(selected("1", "Acme"));
        store.add(selected("2", "Globex"));
        store.add(selected("3", "Initech"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, "3");
        assert_eq!(store.joined_ids(), "3");
    }

    #[test]
    fn test_single_mode_remove_clears_regardless_of_id() {
        let mut store = SelectionStore::new(SelectionMode::Single);
        store.add(selected("1", "Acme"));
        store.remove("some-other-id");
        assert!(store.is_empty());
    }

    #[test]
    fn test_multi_mode_keeps_order_and_dedupes() {
        let mut store = SelectionStore::new(SelectionMode::Multi);
        store.add(selected("1", "Acme"));
        store.add(selected("2", "Globex"));
        store.add(selected("1", "Acme again"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.joined_ids(), "1,2");
        assert_eq!(store.records()[0].name, "Acme");
    }

    #[test]
    fn test_multi_mode_remove_single_entry() {
        let mut store = SelectionStore::new(SelectionMode::Multi);
        store.add(selected("1", "Acme"));
        store.add(selected("2", "Globex"));
        store.remove("1");

        assert_eq!(store.joined_ids(), "2");
    }

    #[test]
    fn test_clear() {
        let mut store = SelectionStore::new(SelectionMode::Multi);
        store.add(selected("1", "Acme"));
        store.add(selected("2", "Globex"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.joined_ids(), "");
    }
}
