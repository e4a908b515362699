use crate::database::structs::page_query_request::PageQueryRequest;

pub const DEFAULT_PAGE_SIZE: i32 = 20;
pub const DEFAULT_PAGE_NUMBER: i32 = 1;

impl<T: Default> Default for PageQueryRequest<T> {
    fn default() -> Self {
        PageQueryRequest::with_data(T::default())
    }
}

impl PageQueryRequest {
    pub fn new() -> PageQueryRequest {
        PageQueryRequest::default()
    }
}

impl<T> PageQueryRequest<T> {
    pub fn with_data(data: T) -> PageQueryRequest<T> {
        PageQueryRequest {
            page_size: DEFAULT_PAGE_SIZE,
            page_number: DEFAULT_PAGE_NUMBER,
            data,
        }
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn set_page_size(&mut self, page_size: i32) {
        if page_size != 0 {
            self.page_size = page_size;
        }
    }

    pub fn set_page_number(&mut self, page_number: i32) {
        if page_number != 0 {
            self.page_number = page_number;
        }
    }

    /// `(offset, limit)` for the requested page, or `None` when size or number is not positive.
    pub fn offset_limit(&self) -> Option<(u64, u64)> {
        if self.page_size <= 0 || self.page_number <= 0 {
            return None;
        }
        let limit = self.page_size as u64;
        Some(((self.page_number as u64 - 1) * limit, limit))
    }
}
