use serde::{Deserialize, Serialize};

/// Page-size defaults applied when normalizing a [`PaginationFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingPolicy {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl PagingPolicy {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Repairs a hand-edited policy so that `1 <= default_page_size <= max_page_size`.
    pub fn sanitized(self) -> Self {
        let max_page_size = self.max_page_size.max(1);
        let default_page_size = self.default_page_size.clamp(1, max_page_size);
        Self {
            default_page_size,
            max_page_size,
        }
    }
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_page_size: Self::DEFAULT_PAGE_SIZE,
            max_page_size: Self::MAX_PAGE_SIZE,
        }
    }
}

/// Requested page, normalized so that `page_number >= 1` and
/// `1 <= page_size <= max_page_size`.
///
/// Invalid input is never rejected; it is silently replaced by the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationFilter {
    page_number: u32,
    page_size: u32,
}

impl PaginationFilter {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self::normalize(Some(page_number), Some(page_size), &PagingPolicy::default())
    }

    pub fn normalize(page_number: Option<i64>, page_size: Option<i64>, policy: &PagingPolicy) -> Self {
        let policy = policy.sanitized();

        let page_number = match page_number {
            Some(n) if n > 0 => n.min(u32::MAX as i64) as u32,
            _ => 1,
        };
        let page_size = match page_size {
            Some(s) if s > 0 => s.min(policy.max_page_size as i64) as u32,
            _ => policy.default_page_size,
        };

        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> u64 {
        (self.page_number as u64 - 1) * self.page_size as u64
    }

    pub fn take(&self) -> u64 {
        self.page_size as u64
    }
}

impl Default for PaginationFilter {
    fn default() -> Self {
        Self::normalize(None, None, &PagingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_page_number_becomes_first_page() {
        for n in [0, -1, -100, i64::MIN] {
            assert_eq!(PaginationFilter::new(n, 10).page_number(), 1);
        }
    }

    #[test]
    fn non_positive_page_size_uses_default() {
        for s in [0, -5, i64::MIN] {
            assert_eq!(PaginationFilter::new(1, s).page_size(), 10);
        }
        assert_eq!(PaginationFilter::default().page_size(), 10);
    }

    #[test]
    fn page_size_is_capped() {
        assert_eq!(PaginationFilter::new(1, 1_000).page_size(), 100);

        let policy = PagingPolicy {
            default_page_size: 5,
            max_page_size: 20,
        };
        let f = PaginationFilter::normalize(Some(2), Some(50), &policy);
        assert_eq!(f.page_size(), 20);
        let f = PaginationFilter::normalize(None, None, &policy);
        assert_eq!(f.page_size(), 5);
    }

    #[test]
    fn skip_is_derived_from_page_number() {
        let f = PaginationFilter::new(3, 10);
        assert_eq!(f.skip(), 20);
        assert_eq!(f.take(), 10);
        assert_eq!(PaginationFilter::new(1, 25).skip(), 0);
    }

    #[test]
    fn broken_policy_is_repaired() {
        let policy = PagingPolicy {
            default_page_size: 0,
            max_page_size: 0,
        }
        .sanitized();
        assert_eq!(policy.max_page_size, 1);
        assert_eq!(policy.default_page_size, 1);

        let policy = PagingPolicy {
            default_page_size: 500,
            max_page_size: 50,
        }
        .sanitized();
        assert_eq!(policy.default_page_size, 50);
    }
}
