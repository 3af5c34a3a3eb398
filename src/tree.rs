//! Tree Utilities
//!
//! Helper functions for tree rendering.

use crate::models::Row;

/// Indentation level of top-level rows
pub const TOP_LEVEL: usize = 1;

/// Render rows as an indented table using recursive DFS
/// Returns (Row, depth) pairs in display order, children detached
pub fn flatten_rows(rows: &[Row]) -> Vec<(Row, usize)> {
    row_tree::flatten(rows, TOP_LEVEL)
        .into_iter()
        .map(|(row, depth)| (row.detached(), depth))
        .collect()
}
