//! Query specifications
//!
//! A specification describes *what* to fetch (criteria, order, page) as data;
//! the evaluator applies it to any collection of the entity type.

pub mod criteria;
pub mod evaluator;
pub mod query;
pub mod sort;

pub use criteria::{Criteria, Searchable};
pub use evaluator::{evaluate, evaluate_page, Identified, Page};
pub use query::{QuerySpecification, QuerySpecificationBuilder};
pub use sort::{cmp_opt_text, cmp_text, OrderBy, SortDirection, SortField};
