//! List page types.

use serde::{Deserialize, Serialize};

/// One page of a list response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// The items on this page.
    #[serde(rename = "Items")]
    pub items: Vec<T>,
    /// Paging metadata, when the server provides it.
    #[serde(rename = "Meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListPageMeta>,
}

/// Paging metadata attached to a list page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPageMeta {
    /// 1-based page number.
    #[serde(rename = "Page", default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Requested page size.
    #[serde(rename = "PageSize", default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Total items across all pages.
    #[serde(rename = "TotalCount", default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Total number of pages.
    #[serde(rename = "TotalPages", default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// 1-based `[first, last]` index of this page's items.
    #[serde(rename = "ItemRange", default, skip_serializing_if = "Option::is_none")]
    pub item_range: Option<Vec<u64>>,
}
