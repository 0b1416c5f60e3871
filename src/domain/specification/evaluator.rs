//! Applies a [`QuerySpecification`] to a materialized collection.
//!
//! Order is always filter → sort → skip → take, and the reported total is the
//! size of the filtered set before paging.

use uuid::Uuid;

use super::query::QuerySpecification;

/// Entities with a unique id, used as the final sort tie-breaker.
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// A page of matching items plus the unpaged match count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

pub fn evaluate<T: Identified>(
    items: impl IntoIterator<Item = T>,
    spec: &QuerySpecification<T>,
) -> Vec<T> {
    evaluate_page(items, spec).items
}

pub fn evaluate_page<T: Identified>(
    items: impl IntoIterator<Item = T>,
    spec: &QuerySpecification<T>,
) -> Page<T> {
    let mut matched: Vec<T> = items
        .into_iter()
        .filter(|item| spec.criteria().is_satisfied_by(item))
        .collect();
    let total = matched.len() as u64;

    match spec.order_by() {
        Some(order) => matched.sort_by(|a, b| order.compare(a, b).then_with(|| a.id().cmp(&b.id()))),
        None => matched.sort_by_key(|item| item.id()),
    }

    let skip = usize::try_from(spec.skip()).unwrap_or(usize::MAX);
    let rest = matched.into_iter().skip(skip);
    let items = if spec.is_paging_enabled() {
        let take = usize::try_from(spec.take()).unwrap_or(usize::MAX);
        rest.take(take).collect()
    } else {
        rest.collect()
    };

    Page { items, total }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::cmp::Ordering;

    use super::*;
    use crate::domain::specification::{Criteria, Searchable, SortDirection, SortField};

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: Uuid,
        name: String,
        age: u32,
    }

    impl Identified for Person {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    impl Searchable for Person {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(&self.name)]
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum PersonField {
        Name,
        Age,
    }

    impl SortField<Person> for PersonField {
        const DEFAULT: Self = Self::Name;
        const ALL: &'static [Self] = &[Self::Name, Self::Age];

        fn name(self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::Age => "age",
            }
        }

        fn compare(self, a: &Person, b: &Person) -> Ordering {
            match self {
                Self::Name => a.name.cmp(&b.name),
                Self::Age => a.age.cmp(&b.age),
            }
        }
    }

    fn person(n: u128, name: &str, age: u32) -> Person {
        Person {
            id: Uuid::from_u128(n),
            name: name.to_string(),
            age,
        }
    }

    fn people(count: u32) -> Vec<Person> {
        // Reverse insertion order so sorting is actually exercised.
        (0..count)
            .rev()
            .map(|i| person(i as u128 + 1, &format!("user{:02}", i + 1), 20 + i % 3))
            .collect()
    }

    fn spec(skip: u64, take: u64) -> QuerySpecification<Person> {
        QuerySpecification::builder()
            .criteria(Criteria::new().and(|p: &Person| p.age != 21))
            .order_by(PersonField::Age, SortDirection::Descending)
            .skip_take(skip, take)
            .build()
    }

    #[test]
    fn twenty_five_items_page_through_in_default_order() {
        let all = people(25);
        let page_spec = |n: i64| {
            let f = crate::shared::PaginationFilter::new(n, 10);
            QuerySpecification::builder()
                .sort_by_name::<PersonField>(None, false)
                .page(&f)
                .build()
        };

        let first = evaluate_page(all.clone(), &page_spec(1));
        assert_eq!(first.total, 25);
        let names: Vec<_> = first.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"user01"));
        assert_eq!(names.last(), Some(&"user10"));

        let third = evaluate_page(all, &page_spec(3));
        assert_eq!(third.items.len(), 5);
        assert_eq!(third.items[0].name, "user21");
        assert_eq!(third.items[4].name, "user25");
    }

    #[test]
    fn paging_equals_manual_slice_of_unpaged_result() {
        let all = people(40);
        let unpaged = evaluate(all.clone(), &spec(0, 0));
        for (skip, take) in [(0, 5), (5, 7), (20, 100), (100, 3)] {
            let paged = evaluate(all.clone(), &spec(skip, take));
            let manual: Vec<_> = unpaged
                .iter()
                .skip(skip as usize)
                .take(take as usize)
                .cloned()
                .collect();
            assert_eq!(paged, manual, "skip={skip} take={take}");
        }
    }

    #[test]
    fn total_is_independent_of_page_size() {
        let all = people(40);
        let expected = all.iter().filter(|p| p.age != 21).count() as u64;
        for take in [0, 1, 3, 10, 1000] {
            assert_eq!(evaluate_page(all.clone(), &spec(0, take)).total, expected);
        }
    }

    #[test]
    fn output_is_deterministic_regardless_of_input_order() {
        let all = people(30);
        let mut shuffled = all.clone();
        shuffled.reverse();
        shuffled.rotate_left(7);

        let a = evaluate(all, &spec(3, 10));
        let b = evaluate(shuffled.clone(), &spec(3, 10));
        let c = evaluate(shuffled, &spec(3, 10));
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn equal_keys_are_broken_by_id() {
        let items = vec![person(3, "c", 30), person(1, "a", 30), person(2, "b", 30)];
        let spec = QuerySpecification::builder()
            .order_by(PersonField::Age, SortDirection::Descending)
            .build();
        let ids: Vec<_> = evaluate(items, &spec).iter().map(|p| p.id.as_u128()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn missing_order_falls_back_to_id() {
        let items = vec![person(9, "z", 1), person(4, "a", 2), person(6, "m", 3)];
        let ids: Vec<_> = evaluate(items, &QuerySpecification::all())
            .iter()
            .map(|p| p.id.as_u128())
            .collect();
        assert_eq!(ids, vec![4, 6, 9]);
    }

    #[test]
    fn search_returns_matching_names_case_insensitively() {
        let items = vec![person(1, "john", 30), person(2, "mary", 25), person(3, "Joy", 28)];
        let spec = QuerySpecification::builder()
            .criteria(Criteria::new().and_search(Some("jo")))
            .order_by(PersonField::Age, SortDirection::Ascending)
            .build();
        let page = evaluate_page(items, &spec);
        let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Joy", "john"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn skip_beyond_end_yields_empty_page_with_total() {
        let page = evaluate_page(people(5), &spec(50, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }
}
