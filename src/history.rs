use ahash::AHashMap as HashMap;

/// The generation-history ledger.
///
/// Stores generation codes in forward order, growing on `record` and
/// shrinking only via `rewind`. Two consecutive entries are never identical
/// (an unchanged generation is not re-recorded), but a code may reappear
/// later after the grid has moved away and cycled back; `index_of` finding
/// such an earlier occurrence is the cycle-detection signal.
#[derive(Debug, Default)]
pub struct History {
    codes: Vec<String>,
    // Earliest position of each recorded code, kept in sync on push and pop.
    first_seen: HashMap<String, usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The most recently recorded code, if any.
    pub fn last(&self) -> Option<&str> {
        self.codes.last().map(String::as_str)
    }

    /// Appends `code` unless it equals the last recorded entry.
    ///
    /// Returns whether the code was appended. Recording the same code twice
    /// in a row leaves the ledger unchanged; this keeps duplicate bookkeeping
    /// from masquerading as a detected cycle.
    pub fn record(&mut self, code: String) -> bool {
        if self.last() == Some(code.as_str()) {
            return false;
        }
        let index = self.codes.len();
        self.first_seen.entry(code.clone()).or_insert(index);
        self.codes.push(code);
        true
    }

    /// Returns the earliest index at which `code` was recorded.
    ///
    /// A hit for a freshly computed generation means the simulation has
    /// entered a periodic orbit of length `len() - index`.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.first_seen.get(code).copied()
    }

    /// Drops the last entry and returns the code of the new last entry.
    ///
    /// Requires at least two entries so that a previous generation exists to
    /// return; with fewer this is a no-op returning `None`. Amortized O(1).
    pub fn rewind(&mut self) -> Option<&str> {
        if self.codes.len() < 2 {
            return None;
        }
        let popped = self.codes.pop().unwrap();
        if self.first_seen.get(&popped) == Some(&self.codes.len()) {
            self.first_seen.remove(&popped);
        }
        self.last()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
        self.first_seen.clear();
    }
}
