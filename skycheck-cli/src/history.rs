/// Bounded in-memory list of recent city queries, most-recent-first.
///
/// Holds at most five distinct entries; repeating a query that is already
/// in the list leaves the list untouched. Not persisted across runs.
#[derive(Debug, Default)]
pub struct SearchHistory {
    entries: Vec<String>,
}

const MAX_ENTRIES: usize = 5;

impl SearchHistory {
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() || self.entries.iter().any(|e| e == query) {
            return;
        }

        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn recent(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
