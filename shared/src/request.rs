//! Request and paging types shared by list endpoints

use serde::{Deserialize, Serialize};

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based, default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl PaginationQuery {
    /// Page number clamped to at least 1
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Get the limit (clamped to 1..=100)
    pub fn limit(&self) -> u32 {
        self.limit.clamp(1, 100)
    }

    /// Get the offset for database queries
    pub fn offset(&self) -> u64 {
        (self.page() - 1) as u64 * self.limit() as u64
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub total_pages: i64,
    pub page: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total_count: i64, query: &PaginationQuery) -> Self {
        let limit = query.limit() as i64;
        Self {
            items,
            total_count,
            total_pages: (total_count + limit - 1) / limit,
            page: query.page(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_offset_and_clamp() {
        let q = PaginationQuery { page: 3, limit: 500 };
        assert_eq!(q.limit(), 100);
        assert_eq!(q.offset(), 200);

        let q = PaginationQuery { page: 0, limit: 0 };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let q = PaginationQuery { page: 1, limit: 20 };
        assert_eq!(Paginated::new(Vec::<i32>::new(), 0, &q).total_pages, 0);
        assert_eq!(Paginated::new(Vec::<i32>::new(), 20, &q).total_pages, 1);
        assert_eq!(Paginated::new(Vec::<i32>::new(), 21, &q).total_pages, 2);
    }
}
