//! Table Row Component
//!
//! One estimate row: level cell plus the five editable inputs.
//! Double-click toggles edit mode, Enter commits, Escape cancels.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cache::RowCache;
use crate::components::RowActions;
use crate::context::use_app_context;
use crate::controller;
use crate::editor::RowEditor;
use crate::models::{Row, RowField};
use crate::store::{use_app_store, AppStateStoreFields};

/// A single row in the estimate table
#[component]
pub fn TableRow(row: Row, depth: usize) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_draft = row.is_draft();
    let editor = RwSignal::new(RowEditor::new(&row));
    let name_ref = NodeRef::<html::Input>::new();

    let draft_open = Memo::new(move |_| store.cache().with(RowCache::has_draft));
    let can_add = Signal::derive(move || editor.with(|e| e.can_add_child(draft_open.get())));
    let disabled = move || !editor.with(RowEditor::is_editing) || editor.with(RowEditor::is_busy);

    // Focus the name input once per entry into edit mode
    Effect::new(move |_| {
        if !editor.with(RowEditor::focus_pending) {
            return;
        }
        if let Some(input) = name_ref.get() {
            editor.update(|e| {
                e.take_focus();
            });
            request_animation_frame(move || {
                if input.focus().is_err() {
                    log::debug!("could not focus name input");
                }
            });
        }
    });

    let commit = move || {
        let service = ctx.service();
        spawn_local(async move {
            controller::commit_row(&service, &store, &editor).await;
        });
    };

    let on_add = move |_: ()| {
        controller::add_child(&store, &editor);
    };

    let on_delete = move |_: ()| {
        let service = ctx.service();
        spawn_local(async move {
            controller::delete_row(&service, &store, &editor).await;
        });
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => commit(),
        "Escape" => {
            if editor.with_untracked(|e| e.is_editing() && !e.is_draft()) {
                editor.update(|e| {
                    e.toggle_edit();
                });
            }
        }
        _ => {}
    };

    let on_input = move |field: RowField, raw: String| {
        editor.update(|e| {
            if let Err(err) = e.set_field(field, &raw) {
                log::debug!("row {}: {}", e.row_id(), err);
            }
        });
    };

    let input_class = move |field: RowField| {
        move || if editor.with(|e| e.is_invalid(field)) { "invalid" } else { "" }
    };

    let amount_cells = RowField::AMOUNTS
        .into_iter()
        .map(move |field| {
            view! {
                <td>
                    <input
                        type="text"
                        inputmode="decimal"
                        class=input_class(field)
                        prop:value=move || editor.with(|e| e.display(field).to_string())
                        disabled=disabled
                        on:input=move |ev| on_input(field, event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                </td>
            }
        })
        .collect_view();

    view! {
        <tr
            class=if is_draft { "row new-row no-select" } else { "row no-select" }
            on:dblclick=move |_| {
                editor.update(|e| {
                    e.toggle_edit();
                });
            }
        >
            <td>
                <RowActions
                    depth=depth
                    can_add=can_add
                    on_add=on_add
                    on_delete=on_delete
                />
            </td>
            <td>
                <input
                    node_ref=name_ref
                    type="text"
                    class=input_class(RowField::RowName)
                    prop:value=move || editor.with(|e| e.display(RowField::RowName).to_string())
                    disabled=disabled
                    on:input=move |ev| on_input(RowField::RowName, event_target_value(&ev))
                    on:keydown=on_keydown
                />
                {move || editor.with(|e| e.last_error().map(|msg| view! {
                    <div class="row-error">{msg.to_string()}</div>
                }))}
            </td>
            {amount_cells}
        </tr>
    }
}
