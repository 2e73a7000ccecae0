use serde::{Deserialize, Serialize};

use crate::content::FactTable;

/// What a viewport resize does to the current selection.
///
/// Indices survive a reseed but the geometry behind them does not, so by
/// default the selection is dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    #[default]
    Reset,
    /// Keep the index if it is still in range; it now names a new point.
    Preserve,
}

/// The single annotated point, if any, and the fact bound to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
    fact: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn fact(&self) -> Option<&str> {
        self.fact.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_none()
    }

    /// Selects `index` and binds its fact.
    pub fn select(&mut self, index: usize, facts: &FactTable) {
        self.index = Some(index);
        self.fact = facts.fact_for(index).map(str::to_owned);
    }

    /// Returns `true` if something was selected.
    pub fn clear(&mut self) -> bool {
        self.fact = None;
        self.index.take().is_some()
    }

    /// Applies `policy` after the point set was replaced by one of `point_count`
    /// points. Returns `true` if the selection was dropped.
    pub fn on_reseed(&mut self, policy: SelectionPolicy, point_count: usize) -> bool {
        match (policy, self.index) {
            (_, None) => false,
            (SelectionPolicy::Preserve, Some(i)) if i < point_count => false,
            _ => self.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, SelectionPolicy};
    use crate::content::FactTable;

    #[test]
    fn reselecting_binds_the_same_fact() {
        let facts = FactTable::new(["zero", "one", "two"]);
        let mut s = Selection::new();
        s.select(5, &facts);
        let first = s.fact().map(str::to_owned);
        s.select(1, &facts);
        s.select(7, &facts);
        s.select(5, &facts);
        assert_eq!(s.fact().map(str::to_owned), first);
        assert_eq!(s.fact(), Some("two"));
        assert_eq!(s.index(), Some(5));
    }

    #[test]
    fn clear_reports_change() {
        let facts = FactTable::new(["x"]);
        let mut s = Selection::new();
        assert!(!s.clear());
        s.select(0, &facts);
        assert!(s.clear());
        assert!(s.is_empty());
        assert_eq!(s.fact(), None);
    }

    #[test]
    fn reseed_policy() {
        let facts = FactTable::new(["x"]);
        let mut s = Selection::new();
        s.select(10, &facts);
        assert!(!s.on_reseed(SelectionPolicy::Preserve, 300));
        assert_eq!(s.index(), Some(10));
        assert!(s.on_reseed(SelectionPolicy::Preserve, 5));
        assert!(s.is_empty());

        s.select(10, &facts);
        assert!(s.on_reseed(SelectionPolicy::Reset, 300));
        assert!(!s.on_reseed(SelectionPolicy::Reset, 300));
    }
}
