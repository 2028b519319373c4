//! Sorted, paged view over an in-memory row set.
//!
//! Columns sort by a typed key, never by their rendered text, so "9 minutes"
//! orders before "10 minutes".

use chrono::FixedOffset;
use contracts::shared::table::{HeaderCell, PaginationInfo, SortDirection, TableView};
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Comparable value behind a cell
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Integer(_) | SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    /// Empty sorts first, numbers before text
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Number(b)) => (*a as f64).total_cmp(b),
            (SortKey::Number(a), SortKey::Integer(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sort state of one column. Each header click advances it:
/// unsorted → ascending → descending → unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortState {
    Unsorted,
    Ascending,
    Descending,
}

impl SortState {
    pub fn next(self) -> SortState {
        match self {
            SortState::Unsorted => SortState::Ascending,
            SortState::Ascending => SortState::Descending,
            SortState::Descending => SortState::Unsorted,
        }
    }

    pub fn direction(self) -> Option<SortDirection> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending => Some(SortDirection::Asc),
            SortState::Descending => Some(SortDirection::Desc),
        }
    }

    pub fn from_direction(direction: Option<SortDirection>) -> SortState {
        match direction {
            None => SortState::Unsorted,
            Some(SortDirection::Asc) => SortState::Ascending,
            Some(SortDirection::Desc) => SortState::Descending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortState::Unsorted => " ↕",
            SortState::Ascending => " ↑",
            SortState::Descending => " ↓",
        }
    }
}

/// Rendering context for cells
#[derive(Debug, Clone, Copy)]
pub struct CellContext {
    /// Offset for wall-clock timestamps
    pub offset: FixedOffset,
}

/// Column of a table over rows of type `R`
pub struct Column<R> {
    pub id: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    pub sort_key: fn(&R) -> SortKey,
    pub render: fn(&R, &CellContext) -> String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub direction: SortDirection,
}

pub struct TablePresenter<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    sorting: Vec<SortSpec>,
    /// Row indices in display order
    order: Vec<usize>,
    page_index: usize,
    page_size: usize,
}

impl<R> TablePresenter<R> {
    pub fn new(rows: Vec<R>, columns: Vec<Column<R>>, page_size: usize) -> Self {
        let order = (0..rows.len()).collect();
        Self {
            rows,
            columns,
            sorting: Vec::new(),
            order,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn sorting(&self) -> &[SortSpec] {
        &self.sorting
    }

    pub fn sort_state(&self, column: &str) -> SortState {
        SortState::from_direction(
            self.sorting()
                .iter()
                .find(|s| s.column == column)
                .map(|s| s.direction),
        )
    }

    /// Header click. Returns false for unknown or non-sortable columns.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        let next = self.sort_state(column).next();
        self.set_sort(column, next.direction())
    }

    /// Replace the active sort with a single column (or clear it with `None`)
    pub fn set_sort(&mut self, column: &str, direction: Option<SortDirection>) -> bool {
        let Some(id) = self
            .columns
            .iter()
            .find(|c| c.id == column && c.sortable)
            .map(|c| c.id)
        else {
            return false;
        };

        self.sorting = match direction {
            Some(direction) => vec![SortSpec { column: id, direction }],
            None => Vec::new(),
        };
        self.apply_sort();
        self.page_index = 0;
        true
    }

    fn apply_sort(&mut self) {
        let keys: Vec<(fn(&R) -> SortKey, SortDirection)> = self
            .sorting
            .iter()
            .filter_map(|spec| {
                self.columns
                    .iter()
                    .find(|c| c.id == spec.column)
                    .map(|c| (c.sort_key, spec.direction))
            })
            .collect();

        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        if !keys.is_empty() {
            let rows = &self.rows;
            // Stable: ties keep input order
            order.sort_by(|&a, &b| {
                for (key, direction) in &keys {
                    let cmp = key(&rows[a]).compare(&key(&rows[b]));
                    let cmp = match direction {
                        SortDirection::Asc => cmp,
                        SortDirection::Desc => cmp.reverse(),
                    };
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                }
                Ordering::Equal
            });
        }
        self.order = order;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// At least 1, so an empty table shows "1 / 1"
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.page_index -= 1;
        }
    }

    /// Jump to a page, clamped to the last one
    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index.min(self.page_count() - 1);
    }

    pub fn sorted_rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.order.iter().map(move |&i| &self.rows[i])
    }

    /// Rows of the current page
    pub fn visible_rows(&self) -> Vec<&R> {
        self.sorted_rows()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|c| {
                let state = self.sort_state(c.id);
                HeaderCell {
                    id: c.id.to_string(),
                    title: c.title.to_string(),
                    sortable: c.sortable,
                    sort: state.direction(),
                    indicator: if c.sortable {
                        state.indicator().to_string()
                    } else {
                        String::new()
                    },
                }
            })
            .collect()
    }

    pub fn render_visible(&self, ctx: &CellContext) -> Vec<Vec<String>> {
        self.visible_rows()
            .into_iter()
            .map(|row| self.columns.iter().map(|c| (c.render)(row, ctx)).collect())
            .collect()
    }

    pub fn pagination(&self) -> PaginationInfo {
        let total = self.row_count();
        let (page_index, page_size) = (self.page_index(), self.page_size());
        let (first_row, last_row) = if total == 0 {
            (0, 0)
        } else {
            (
                page_index * page_size + 1,
                ((page_index + 1) * page_size).min(total),
            )
        };
        PaginationInfo {
            page_index,
            page_count: self.page_count(),
            page_size,
            total_rows: total,
            first_row,
            last_row,
            can_previous: self.can_previous_page(),
            can_next: self.can_next_page(),
            label: format!("{} / {}", page_index + 1, self.page_count()),
        }
    }

    pub fn view(&self, ctx: &CellContext) -> TableView {
        TableView {
            headers: self.headers(),
            rows: self.render_visible(ctx),
            pagination: self.pagination(),
        }
    }
}
