use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Paging parameters. When both are absent the listing is returned unpaged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PageQuery {
    /// Zero-based page index.
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn is_paged(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of a listing plus the totals a client needs to navigate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
    pub size: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let size = size.max(1);
        let total_pages = total_elements.div_ceil(u64::from(size));
        Self {
            content,
            total_elements,
            total_pages,
            number,
            size,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}
