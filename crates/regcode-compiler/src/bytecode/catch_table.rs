//! Catch tables.
//!
//! A catch table maps guarded instruction ranges to handler offsets. The
//! runtime scans it when an error is thrown and picks the innermost entry
//! covering the throwing instruction.

/// One guarded range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchEntry {
    /// First guarded instruction offset.
    pub start: u32,
    /// One past the last guarded instruction offset.
    pub stop: u32,
    /// Offset of the first handler instruction.
    pub jump_to: u32,
    /// Register receiving the thrown value.
    pub register: u32,
}

impl CatchEntry {
    /// Whether `offset` lies in the guarded range.
    pub fn covers(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.stop
    }
}

/// Catch entries of a code object, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatchTable {
    entries: Vec<CatchEntry>,
}

impl CatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: CatchEntry) {
        self.entries.push(entry);
    }

    /// All entries.
    pub fn entries(&self) -> &[CatchEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, CatchEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a CatchTable {
    type Item = &'a CatchEntry;
    type IntoIter = std::slice::Iter<'a, CatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_is_half_open() {
        let entry = CatchEntry {
            start: 2,
            stop: 5,
            jump_to: 6,
            register: 0,
        };

        assert!(!entry.covers(1));
        assert!(entry.covers(2));
        assert!(entry.covers(4));
        assert!(!entry.covers(5));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut table = CatchTable::new();
        assert!(table.is_empty());

        table.push(CatchEntry {
            start: 0,
            stop: 4,
            jump_to: 4,
            register: 1,
        });
        table.push(CatchEntry {
            start: 1,
            stop: 2,
            jump_to: 2,
            register: 2,
        });

        let registers: Vec<_> = table.iter().map(|e| e.register).collect();
        assert_eq!(registers, vec![1, 2]);
        assert_eq!(table.len(), 2);
    }
}
