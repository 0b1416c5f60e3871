//! Composable filter predicates.

use std::borrow::Cow;
use std::fmt;

type Clause<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Entities that take part in free-text search.
pub trait Searchable {
    /// Fields matched (case-insensitive substring) by a search term.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// Conjunction of independent clauses. An empty set matches everything.
pub struct Criteria<T> {
    clauses: Vec<Clause<T>>,
}

impl<T> Criteria<T> {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    pub fn and<F>(mut self, clause: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.clauses.push(Box::new(clause));
        self
    }

    /// Adds the clause built by `make` only when `value` is present.
    pub fn and_if<V, F>(self, value: Option<V>, make: impl FnOnce(V) -> F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        match value {
            Some(v) => self.and(make(v)),
            None => self,
        }
    }

    pub fn is_satisfied_by(&self, item: &T) -> bool {
        self.clauses.iter().all(|clause| clause(item))
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<T: Searchable> Criteria<T> {
    /// Free-text clause over [`Searchable::search_fields`]; blank terms add nothing.
    pub fn and_search(self, term: Option<&str>) -> Self {
        let needle = term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase);
        self.and_if(needle, |needle| {
            move |item: &T| {
                item.search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        })
    }
}

impl<T> Default for Criteria<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Criteria<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criteria")
            .field("clauses", &self.clauses.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name(&'static str, u32);

    impl Searchable for Name {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(self.0)]
        }
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let c = Criteria::<Name>::new();
        assert!(c.is_empty());
        assert!(c.is_satisfied_by(&Name("x", 0)));
    }

    #[test]
    fn clauses_are_combined_with_and() {
        let c = Criteria::new().and(|n: &Name| n.1 > 1).and(|n: &Name| n.1 < 5);
        assert!(c.is_satisfied_by(&Name("a", 3)));
        assert!(!c.is_satisfied_by(&Name("a", 7)));
        assert!(!c.is_satisfied_by(&Name("a", 0)));
    }

    #[test]
    fn and_if_skips_absent_values() {
        let c = Criteria::new().and_if(None::<u32>, |v| move |n: &Name| n.1 == v);
        assert!(c.is_empty());

        let c = Criteria::new().and_if(Some(2), |v| move |n: &Name| n.1 == v);
        assert_eq!(c.len(), 1);
        assert!(c.is_satisfied_by(&Name("a", 2)));
        assert!(!c.is_satisfied_by(&Name("a", 3)));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let c = Criteria::new().and_search(Some("JO"));
        assert!(c.is_satisfied_by(&Name("john", 0)));
        assert!(c.is_satisfied_by(&Name("Joy", 0)));
        assert!(!c.is_satisfied_by(&Name("mary", 0)));
    }

    #[test]
    fn blank_search_adds_no_clause() {
        assert!(Criteria::<Name>::new().and_search(Some("   ")).is_empty());
        assert!(Criteria::<Name>::new().and_search(None).is_empty());
    }
}
