//! Estimate Table Component
//!
//! Renders the cached row tree as a flat, indented table.

use leptos::prelude::*;

use crate::cache::{CacheView, RowCache};
use crate::components::TableRow;
use crate::models::RowField;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tree::flatten_rows;

/// Columns: level cell plus one per editable field
const COLUMN_COUNT: usize = RowField::ALL.len() + 1;

#[component]
pub fn EstimateTable() -> impl IntoView {
    let store = use_app_store();

    let rows = move || store.cache().with(|cache| flatten_rows(cache.rows()));

    let status_row = move || {
        store.cache().with(|cache: &RowCache| match cache.view() {
            CacheView::Loading => Some(("status", "Loading...".to_string())),
            CacheView::Failed(msg) => {
                Some(("status error", format!("Error loading data: {}", msg)))
            }
            CacheView::Ready { stale_error: Some(msg), .. } => {
                Some(("status error", format!("Reload failed, showing cached rows: {}", msg)))
            }
            CacheView::Ready { .. } => None,
        })
    };

    view! {
        <div class="table no-select">
            <div class="title">
                <h4>"Строительно-монтажные работы"</h4>
            </div>
            <div class="table-section">
                <table>
                    <thead>
                        <tr>
                            <th>"Уровень"</th>
                            {RowField::ALL.map(|field| view! { <th>{field.label()}</th> }).to_vec()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || status_row().map(|(class, text)| view! {
                            <tr class=class>
                                <td colspan=COLUMN_COUNT.to_string()>{text}</td>
                            </tr>
                        })}
                        <For
                            each=rows
                            // Any value change remounts the row with a fresh editor
                            key=|(row, depth)| (row.render_key(), *depth)
                            children=move |(row, depth)| {
                                view! { <TableRow row=row depth=depth /> }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}
