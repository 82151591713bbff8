/// Pagination envelope returned alongside every paged listing
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub current_page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Pagination for page `current_page` of a listing with `total_items`
    /// items, `limit` items per page. A zero limit is treated as 1.
    pub fn for_listing(total_items: u64, current_page: u32, limit: u32) -> Pagination {
        let limit = limit.max(1);
        let total_pages = ((total_items + u64::from(limit) - 1) / u64::from(limit)) as u32;
        Pagination {
            total_items,
            current_page,
            limit,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_math() {
        let p = Pagination::for_listing(25, 1, 10);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page);
        assert!(!p.has_prev_page);

        let p = Pagination::for_listing(25, 3, 10);
        assert!(!p.has_next_page);
        assert!(p.has_prev_page);

        let p = Pagination::for_listing(0, 1, 10);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
    }
}
