use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Column header as rendered above a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub id: String,
    pub title: String,
    pub sortable: bool,
    /// Active direction, None when the column is not sorted
    pub sort: Option<SortDirection>,
    /// " ↑", " ↓", " ↕" for sortable columns, empty otherwise
    pub indicator: String,
}

/// Navigation state of a paged table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Zero-based
    pub page_index: usize,
    /// Never below 1
    pub page_count: usize,
    pub page_size: usize,
    pub total_rows: usize,
    /// 1-based index of the first visible row, 0 when empty
    pub first_row: usize,
    pub last_row: usize,
    pub can_previous: bool,
    pub can_next: bool,
    /// "{page} / {page_count}"
    pub label: String,
}

/// Rendered page of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
    pub pagination: PaginationInfo,
}
