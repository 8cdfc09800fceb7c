use crate::domain::entities::query::PageSize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub window: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub page_size: usize,
}

impl<T> PageResult<T> {
    pub fn first_row(&self) -> usize {
        if self.window.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.window.is_empty() {
            0
        } else {
            self.first_row() + self.window.len() - 1
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first_row(),
            self.last_row(),
            self.total_rows
        )
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(total_rows: usize, page_size: PageSize) -> usize {
    total_rows.div_ceil(page_size.get()).max(1)
}

pub fn paginate<T: Clone>(ordered: &[T], page: usize, page_size: PageSize) -> PageResult<T> {
    let page = page.max(1);
    let size = page_size.get();
    let start = (page - 1).saturating_mul(size).min(ordered.len());
    let end = start.saturating_add(size).min(ordered.len());

    PageResult {
        window: ordered[start..end].to_vec(),
        page,
        total_pages: total_pages(ordered.len(), page_size),
        total_rows: ordered.len(),
        page_size: size,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    First,
    Previous,
    Next,
    Last,
    Goto(usize),
}

impl PageRequest {
    pub fn resolve(self, current: usize, total_pages: usize) -> usize {
        let last = total_pages.max(1);
        let target = match self {
            PageRequest::First => 1,
            PageRequest::Previous => current.saturating_sub(1),
            PageRequest::Next => current.saturating_add(1),
            PageRequest::Last => last,
            PageRequest::Goto(page) => page,
        };
        target.clamp(1, last)
    }
}
