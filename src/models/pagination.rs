//! 分页相关的数据结构

use serde::Serialize;
use utoipa::ToSchema;

const DEFAULT_PAGE_SIZE: usize = 100;
const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct PaginationParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PaginationParams {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.map(|p| p as usize),
            page_size: per_page.map(|p| p as usize),
        }
    }

    pub fn get_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn get_offset(&self) -> usize {
        (self.get_page() - 1) * self.get_page_size()
    }

    pub fn get_limit(&self) -> usize {
        self.get_page_size()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T: Clone> PaginatedResponse<T> {
    /// 从完整列表中截取一页
    pub fn from_slice(items: &[T], params: &PaginationParams) -> Self {
        let data = items
            .iter()
            .skip(params.get_offset())
            .take(params.get_limit())
            .cloned()
            .collect();
        Self::new(data, params.get_page(), params.get_page_size(), items.len())
    }
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: usize, page_size: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(page_size.max(1));
        Self {
            data,
            page,
            page_size,
            total,
            total_pages,
        }
    }
}
