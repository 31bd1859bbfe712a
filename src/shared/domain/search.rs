//! Pagination, sorting and filtering contract shared by every aggregate's
//! repository.

use serde::{Deserialize, Serialize};

/// Default page size when the caller passes none or an invalid value.
pub const DEFAULT_PER_PAGE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse case-insensitively; anything other than "desc" sorts ascending.
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

/// Search input for repository queries, generic over the aggregate-specific
/// filter shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams<F> {
    page: u32,
    per_page: u32,
    sort: Option<String>,
    sort_dir: SortDirection,
    filter: Option<F>,
}

impl<F> SearchParams<F> {
    /// Build normalized parameters: a page or page size below 1 falls back to
    /// the defaults, sort direction is parsed case-insensitively.
    pub fn new(
        page: u32,
        per_page: u32,
        sort: Option<String>,
        sort_dir: &str,
        filter: Option<F>,
    ) -> Self {
        Self {
            page: if page >= 1 { page } else { 1 },
            per_page: if per_page >= 1 {
                per_page
            } else {
                DEFAULT_PER_PAGE
            },
            sort,
            sort_dir: SortDirection::parse(sort_dir),
            filter,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    /// Offset for storage queries.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    /// Limit for storage queries.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: SortDirection::Asc,
            filter: None,
        }
    }
}

/// One page of search output, derived once and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<A> {
    pub items: Vec<A>,
    pub total: u64,
    pub current_page: u32,
    pub per_page: u32,
}

impl<A> SearchResult<A> {
    pub fn new(items: Vec<A>, total: u64, current_page: u32, per_page: u32) -> Self {
        Self {
            items,
            total,
            current_page,
            per_page,
        }
    }

    /// Number of pages over the filtered (pre-pagination) set.
    pub fn last_page(&self) -> u32 {
        ((self.total as f64) / (self.per_page as f64)).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_invalid_page_and_per_page() {
        let params: SearchParams<()> = SearchParams::new(0, 0, None, "asc", None);
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), DEFAULT_PER_PAGE);
    }

    #[test]
    fn sort_dir_is_case_insensitive() {
        let params: SearchParams<()> = SearchParams::new(1, 10, None, "DESC", None);
        assert_eq!(params.sort_dir(), SortDirection::Desc);
        let params: SearchParams<()> = SearchParams::new(1, 10, None, "nonsense", None);
        assert_eq!(params.sort_dir(), SortDirection::Asc);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let params: SearchParams<()> = SearchParams::new(3, 10, None, "asc", None);
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    #[allow(arithmetic_overflow)]
    fn offset_handles_maximal_page_and_per_page() {
        let params: SearchParams<()> = SearchParams::new(u32::MAX, u32::MAX, None, "asc", None);
        let expected = (u32::MAX as i64 - 1) * u32::MAX as i64;
        assert_eq!(params.offset(), expected);
    }

    #[test]
    fn last_page_is_ceiling_of_total_over_per_page() {
        let result: SearchResult<u8> = SearchResult::new(vec![], 41, 1, 10);
        assert_eq!(result.last_page(), 5);
        let result: SearchResult<u8> = SearchResult::new(vec![], 40, 1, 10);
        assert_eq!(result.last_page(), 4);
        let result: SearchResult<u8> = SearchResult::new(vec![], 0, 1, 10);
        assert_eq!(result.last_page(), 0);
    }
}
