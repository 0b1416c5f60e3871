use super::criteria::Criteria;
use super::sort::{OrderBy, SortDirection, SortField};
use crate::shared::PaginationFilter;

/// Immutable description of one query: filter, sort and page.
///
/// Built once per request through [`QuerySpecification::builder`] and evaluated
/// against any collection of `T`.
#[derive(Debug)]
pub struct QuerySpecification<T> {
    criteria: Criteria<T>,
    order_by: Option<OrderBy<T>>,
    skip: u64,
    take: u64,
}

impl<T> QuerySpecification<T> {
    pub fn builder() -> QuerySpecificationBuilder<T> {
        QuerySpecificationBuilder {
            criteria: Criteria::new(),
            order_by: None,
            skip: 0,
            take: 0,
        }
    }

    /// Matches everything, default order, no paging.
    pub fn all() -> Self {
        Self::builder().build()
    }

    pub fn criteria(&self) -> &Criteria<T> {
        &self.criteria
    }

    pub fn order_by(&self) -> Option<&OrderBy<T>> {
        self.order_by.as_ref()
    }

    pub fn order_by_key(&self) -> Option<&'static str> {
        self.order_by
            .as_ref()
            .filter(|o| o.direction() == SortDirection::Ascending)
            .map(OrderBy::field)
    }

    pub fn order_by_descending_key(&self) -> Option<&'static str> {
        self.order_by
            .as_ref()
            .filter(|o| o.direction() == SortDirection::Descending)
            .map(OrderBy::field)
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    pub fn take(&self) -> u64 {
        self.take
    }

    /// `take == 0` means "no limit".
    pub fn is_paging_enabled(&self) -> bool {
        self.take > 0
    }
}

pub struct QuerySpecificationBuilder<T> {
    criteria: Criteria<T>,
    order_by: Option<OrderBy<T>>,
    skip: u64,
    take: u64,
}

impl<T> QuerySpecificationBuilder<T> {
    pub fn criteria(mut self, criteria: Criteria<T>) -> Self {
        self.criteria = criteria;
        self
    }

    /// Replaces any previously set key, so only one direction is ever active.
    pub fn order_by<F: SortField<T>>(mut self, field: F, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy::new(field, direction));
        self
    }

    /// Resolves a caller-supplied field name; unknown or absent names use `F::DEFAULT`.
    pub fn sort_by_name<F: SortField<T>>(self, name: Option<&str>, is_descending: bool) -> Self {
        self.order_by(F::resolve(name), SortDirection::from_descending(is_descending))
    }

    pub fn skip_take(mut self, skip: u64, take: u64) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }

    pub fn page(self, filter: &PaginationFilter) -> Self {
        self.skip_take(filter.skip(), filter.take())
    }

    pub fn build(self) -> QuerySpecification<T> {
        QuerySpecification {
            criteria: self.criteria,
            order_by: self.order_by,
            skip: self.skip,
            take: self.take,
        }
    }
}
