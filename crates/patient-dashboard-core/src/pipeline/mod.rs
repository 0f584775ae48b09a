//! List pipeline behind the patient table.
//!
//! Pipeline: Search → Gender Filter → Sort → Paginate
//!
//! The order is fixed so that page counts always describe the visible set.
//! The whole pipeline is a pure function of the list and a [`ViewQuery`] and
//! is simply re-run after every state change; the list is small enough that
//! nothing is cached.

mod filter;
mod paginate;
mod query;
mod sort;

pub use filter::*;
pub use paginate::*;
pub use query::*;
pub use sort::*;

use serde::Serialize;
use thiserror::Error;

use crate::models::Patient;

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// Errors raised when view-layer strings are parsed into pipeline inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Unknown gender filter: {0}")]
    UnknownGenderFilter(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// One page of the table plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPage {
    pub rows: Vec<Patient>,
    /// 1-based page that was requested
    pub page: usize,
    pub total_pages: usize,
    /// Rows left after search and gender filtering
    pub total_matches: usize,
}

/// Run the full pipeline over `patients`.
pub fn derive_view(patients: &[Patient], query: &ViewQuery) -> ViewPage {
    let mut rows = filter_patients(patients, &query.search_term, query.gender_filter);

    if let Some(key) = query.sort_key {
        sort_patients(&mut rows, key, query.sort_order);
    }

    let total_matches = rows.len();
    let page_rows = page_slice(&rows, query.page, query.page_size)
        .iter()
        .map(|p| (*p).clone())
        .collect();

    ViewPage {
        rows: page_rows,
        page: query.page,
        total_pages: total_pages(total_matches, query.page_size),
        total_matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Gender};

    fn make(id: i64, gender: Gender, dept: &str) -> Patient {
        Patient {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            age: (id as u32 * 7) % 90,
            gender,
            email: format!("p{}@hospital.test", id),
            phone: "5551112222".into(),
            birth_date: "1980-06-06".into(),
            blood_group: "A+".into(),
            height: 170.0,
            weight: 70.0,
            address: Address {
                city: "Chicago".into(),
                street: None,
            },
            admission_department: dept.into(),
            image: String::new(),
        }
    }

    fn list_of(n: i64) -> Vec<Patient> {
        (1..=n)
            .map(|id| {
                let gender = if id % 2 == 0 { Gender::Female } else { Gender::Male };
                make(id, gender, if id % 3 == 0 { "Surgery" } else { "Pediatrics" })
            })
            .collect()
    }

    #[test]
    fn test_default_query_is_first_page_in_input_order() {
        let list = list_of(12);
        let view = derive_view(&list, &ViewQuery::default());
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].id, 1);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.total_matches, 12);
    }

    #[test]
    fn test_pagination_of_25() {
        let list = list_of(25);
        let query = ViewQuery::default();

        let view = derive_view(&list, &query);
        assert_eq!(view.total_pages, 3);

        let page3 = derive_view(&list, &query.clone().with_page(3));
        assert_eq!(page3.rows.len(), 5);

        let page4 = derive_view(&list, &query.clone().with_page(4));
        assert!(page4.rows.is_empty());
        assert_eq!(page4.total_pages, 3);

        let total: usize = (1..=3)
            .map(|p| derive_view(&list, &query.clone().with_page(p)).rows.len())
            .sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn test_empty_list() {
        let view = derive_view(&[], &ViewQuery::default());
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.total_matches, 0);
    }

    #[test]
    fn test_no_match() {
        let list = list_of(5);
        let view = derive_view(&list, &ViewQuery::default().with_search("zzz-nothing"));
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn test_filter_then_sort_then_page() {
        let list = list_of(30);
        let query = ViewQuery::default()
            .with_search("surgery")
            .with_gender(GenderFilter::Female)
            .with_sort(SortKey::Id, SortOrder::Desc);

        let view = derive_view(&list, &query);
        // ids divisible by 6 up to 30
        let ids: Vec<i64> = view.rows.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![30, 24, 18, 12, 6]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_gender_filter_count_matches_manual() {
        let list = list_of(23);
        let query = ViewQuery::default().with_gender(GenderFilter::Male);
        let view = derive_view(&list, &query);
        let manual = list.iter().filter(|p| p.gender == Gender::Male).count();
        assert_eq!(view.total_matches, manual);
        assert!(view.rows.iter().all(|p| p.gender == Gender::Male));
    }
}
