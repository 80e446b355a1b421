//! Paginated response wrapper

use serde::Serialize;
use utoipa::ToSchema;

/// A single page of records with pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records in this page
    pub content: Vec<T>,
    /// Page number (0-based)
    pub page: i64,
    /// Requested page size
    pub size: i64,
    /// Total records across all pages
    pub total_elements: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Whether this is the last page
    pub is_last: bool,
}

impl<T> PagedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Slice a window of up to `size` records at offset `page * size` out of
    /// the full result set and compute the page metadata.
    ///
    /// Callers must validate `page >= 0` and `size >= 1` first.
    pub fn new(all: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        let content: Vec<T> = all
            .into_iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .collect();
        let total_pages = (total_elements + size - 1) / size;
        let is_last = page >= total_pages - 1;

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            is_last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::Schedule;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn schedules(n: i64) -> Vec<Schedule> {
        (1..=n)
            .map(|i| Schedule {
                id: Some(i),
                employee_id: i,
                user_id: i,
                start_at: at(9),
                end_at: at(10),
                details: None,
                headquarters: None,
                office: None,
                in_person: None,
                group_session: false,
                created_at: at(8),
                updated_at: at(8),
            })
            .collect()
    }

    #[test]
    fn last_partial_page() {
        let page = PagedResponse::new(schedules(25), 2, 10, 25);
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_last);
        assert_eq!(page.content[0].id, Some(21));
    }

    #[test]
    fn first_full_page() {
        let page = PagedResponse::new(schedules(25), 0, 10, 25);
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.content[0].id, Some(1));
        assert!(!page.is_last);
    }

    #[test]
    fn out_of_range_page_is_empty_and_last() {
        let page = PagedResponse::new(schedules(25), 5, 10, 25);
        assert!(page.content.is_empty());
        assert!(page.is_last);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_collection() {
        let page = PagedResponse::new(schedules(0), 0, 10, 0);
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.is_last);
    }

    #[test]
    fn exact_multiple_of_size() {
        let page = PagedResponse::new(schedules(20), 1, 10, 20);
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_pages, 2);
        assert!(page.is_last);
    }
}
