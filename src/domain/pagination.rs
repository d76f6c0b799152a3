use {super::error::TimelineError, serde::Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Page number and size as requested by the client.
///
/// The page number is not range-checked here; [`Paginator::window`] clamps it
/// once the total is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: u64) -> Result<Self, TimelineError> {
        if page_size == 0 {
            return Err(TimelineError::validation("page_size must be at least 1"));
        }
        Ok(Self { page, page_size })
    }

    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> Result<Self, TimelineError> {
        let page = match page {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| TimelineError::validation("page must be an integer"))?,
            None => DEFAULT_PAGE,
        };
        let page_size = match page_size {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| TimelineError::validation("page_size must be a positive integer"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        Self::new(page, page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The slice of rows one page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Page arithmetic over a known row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_count: u64,
    page_size: u64,
}

impl Paginator {
    pub fn new(total_count: u64, page_size: u64) -> Self {
        Self {
            total_count,
            page_size: page_size.max(1),
        }
    }

    /// Always at least one page, even when there are no rows.
    pub fn num_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size).max(1)
    }

    /// Resolves a requested page. Anything below 1 or past the end falls back
    /// to the last page.
    pub fn window(&self, requested: i64) -> PageWindow {
        let last = self.num_pages();
        let number = u64::try_from(requested)
            .ok()
            .filter(|n| (1..=last).contains(n))
            .unwrap_or(last);
        PageWindow {
            number,
            offset: (number - 1) * self.page_size,
            limit: self.page_size,
        }
    }

    pub fn meta(&self, window: &PageWindow) -> PaginationMeta {
        let total_pages = self.num_pages();
        PaginationMeta {
            current_page: window.number,
            total_pages,
            total_count: self.total_count,
            has_next: window.number < total_pages,
            has_previous: window.number > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}
