//! UI Components
//!
//! Reusable Leptos components.

mod estimate_table;
mod navbar;
mod row_actions;
mod table_row;

pub use estimate_table::EstimateTable;
pub use navbar::Navbar;
pub use row_actions::RowActions;
pub use table_row::TableRow;
