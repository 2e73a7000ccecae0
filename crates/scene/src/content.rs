/// Read-only, ordered list of short texts shown next to selected points.
///
/// Point `i` always maps to `facts[i % len]`, independent of selection history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactTable {
    facts: Vec<String>,
}

impl FactTable {
    pub fn new<I, S>(facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            facts: facts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// `None` only when the table is empty.
    pub fn fact_for(&self, index: usize) -> Option<&str> {
        if self.facts.is_empty() {
            return None;
        }
        self.facts.get(index % self.facts.len()).map(String::as_str)
    }
}

/// Overlay header for a point, e.g. `Node_01F`.
pub fn node_label(index: usize) -> String {
    format!("Node_{index:03X}")
}
