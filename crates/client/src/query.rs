//! Query parameters and paged results shared by list endpoints.

use cwcrm_core::Stored;

/// Response header carrying the total number of matching records.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Optional paging and sorting for `query` and `search` calls.
///
/// An empty value sends no parameters, which returns the server's
/// default listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Sort clauses in `property,direction` form, e.g. `dueDate,asc`.
    pub sort: Vec<String>,
}

impl QueryParams {
    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn sort_by(mut self, clause: impl Into<String>) -> Self {
        self.sort.push(clause.into());
        self
    }

    /// Flatten into query-string pairs. Repeated `sort` keys are kept.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        for clause in &self.sort {
            pairs.push(("sort", clause.clone()));
        }
        pairs
    }
}

/// One page of records plus the server's total, when reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    pub items: Vec<Stored<E>>,
    pub total_count: Option<u64>,
}

impl<E> Page<E> {
    pub fn new(items: Vec<Stored<E>>, total_count: Option<u64>) -> Self {
        Self { items, total_count }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_send_nothing() {
        assert!(QueryParams::default().to_pairs().is_empty());
    }

    #[test]
    fn sort_clauses_repeat() {
        let params = QueryParams::default()
            .page(2, 20)
            .sort_by("dueDate,asc")
            .sort_by("id");
        assert_eq!(
            params.to_pairs(),
            vec![
                ("page", "2".to_string()),
                ("size", "20".to_string()),
                ("sort", "dueDate,asc".to_string()),
                ("sort", "id".to_string()),
            ]
        );
    }
}
