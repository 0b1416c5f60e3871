//! Sort-key resolution: a closed table of named, typed comparators per entity.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(is_descending: bool) -> Self {
        if is_descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// The fixed set of fields an entity can be sorted by.
///
/// Implemented by a fieldless enum per entity; `ALL` is the lookup table and
/// `DEFAULT` the fallback for absent or unknown names.
pub trait SortField<T>: Copy + fmt::Debug + Send + Sync + 'static {
    const DEFAULT: Self;
    const ALL: &'static [Self];

    /// Public (camelCase) name accepted from callers.
    fn name(self) -> &'static str;

    fn compare(self, a: &T, b: &T) -> Ordering;

    /// Case-insensitive lookup that also ignores `_` and `-`.
    fn parse(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Self::ALL
            .iter()
            .copied()
            .find(|field| normalize_name(field.name()) == wanted)
    }

    fn resolve(name: Option<&str>) -> Self {
        name.and_then(Self::parse).unwrap_or(Self::DEFAULT)
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Text ordering that ignores case first, then falls back to the raw bytes.
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

pub fn cmp_opt_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_text(a, b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// A resolved sort key plus direction.
pub struct OrderBy<T> {
    field: &'static str,
    compare: Comparator<T>,
    direction: SortDirection,
}

impl<T> OrderBy<T> {
    pub fn new<F: SortField<T>>(field: F, direction: SortDirection) -> Self {
        Self {
            field: field.name(),
            compare: Box::new(move |a, b| field.compare(a, b)),
            direction,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl<T> fmt::Debug for OrderBy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy")
            .field("field", &self.field)
            .field("direction", &self.direction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum PairField {
        Left,
        Right,
    }

    impl SortField<(u8, u8)> for PairField {
        const DEFAULT: Self = Self::Left;
        const ALL: &'static [Self] = &[Self::Left, Self::Right];

        fn name(self) -> &'static str {
            match self {
                Self::Left => "leftValue",
                Self::Right => "rightValue",
            }
        }

        fn compare(self, a: &(u8, u8), b: &(u8, u8)) -> Ordering {
            match self {
                Self::Left => a.0.cmp(&b.0),
                Self::Right => a.1.cmp(&b.1),
            }
        }
    }

    #[test]
    fn parse_ignores_case_and_separators() {
        assert_eq!(PairField::parse("rightvalue"), Some(PairField::Right));
        assert_eq!(PairField::parse("RIGHT_VALUE"), Some(PairField::Right));
        assert_eq!(PairField::parse("right-Value"), Some(PairField::Right));
        assert_eq!(PairField::parse("middle"), None);
    }

    #[test]
    fn unknown_or_missing_names_fall_back_to_default() {
        assert_eq!(PairField::resolve(Some("nope")), PairField::Left);
        assert_eq!(PairField::resolve(None), PairField::Left);
        assert_eq!(PairField::resolve(Some("RightValue")), PairField::Right);
    }

    #[test]
    fn descending_reverses_comparison() {
        let asc = OrderBy::new(PairField::Right, SortDirection::Ascending);
        let desc = OrderBy::new(PairField::Right, SortDirection::Descending);
        assert_eq!(asc.compare(&(0, 1), &(0, 2)), Ordering::Less);
        assert_eq!(desc.compare(&(0, 1), &(0, 2)), Ordering::Greater);
        assert_eq!(desc.field(), "rightValue");
    }

    #[test]
    fn text_comparison_ignores_case() {
        assert_eq!(cmp_text("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp_text("B", "b"), Ordering::Less);
        assert_eq!(cmp_opt_text(None, Some("a")), Ordering::Less);
    }
}
