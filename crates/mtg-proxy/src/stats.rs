use crate::layout::page_count;

/// Summary of a laid-out sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetStatistics {
    /// Physical copies placed
    pub cards: usize,
    pub pages: usize,
    pub cards_per_page: usize,
    /// Unused cells on the last page
    pub empty_slots: usize,
}

/// Calculate statistics for `count` cards on a `rows × cols` grid
pub fn calculate_statistics(count: usize, rows: usize, cols: usize) -> SheetStatistics {
    let cards_per_page = rows * cols;
    let pages = page_count(count, rows, cols);

    SheetStatistics {
        cards: count,
        pages,
        cards_per_page,
        empty_slots: pages * cards_per_page - count,
    }
}
