//! In-memory list of the records currently on screen.

use crate::article::ArticleRecord;

/// Ordered results of the last completed search
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Vec<ArticleRecord>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole result set
    pub fn replace(&mut self, records: Vec<ArticleRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Record at a zero-based position
    pub fn get(&self, index: usize) -> Option<&ArticleRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
