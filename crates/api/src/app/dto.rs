use serde::Deserialize;

use stockroom_core::{PageRequest, DEFAULT_PAGE_SIZE};

/// Query parameters accepted by list endpoints.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub page_index: u32,
    pub page_size: u32,
    pub sort_field: Option<String>,
    pub sort_desc: bool,
    pub filter: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: None,
            sort_desc: false,
            filter: None,
        }
    }
}

impl ListQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest {
            page_index: self.page_index,
            page_size: self.page_size,
            sort_field: self.sort_field.clone(),
            sort_desc: self.sort_desc,
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}
