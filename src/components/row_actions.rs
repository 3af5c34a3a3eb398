//! Row Actions Cell
//!
//! Level column of a row: indentation, add-child and delete icons.

use leptos::prelude::*;

/// Pixels of indentation per tree level
const INDENT_PX: usize = 20;

/// Add-child icon plus a delete icon revealed while hovered
#[component]
pub fn RowActions(
    depth: usize,
    #[prop(into)] can_add: Signal<bool>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let (hovered, set_hovered) = signal(false);

    let container_class = move || {
        let mut c = format!("container nested-{}", depth);
        if !hovered.get() {
            c.push_str(" transparent");
        }
        c
    };

    view! {
        <div
            class="cell"
            data-nested=depth.to_string()
            style=format!("margin-left: {}px;", depth * INDENT_PX)
        >
            <div
                class=container_class
                on:mouseover=move |_| set_hovered.set(true)
                on:mouseout=move |_| set_hovered.set(false)
            >
                <button
                    class="icon add-child"
                    title="Добавить строку"
                    disabled=move || !can_add.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_add.run(());
                    }
                >
                    "📄"
                </button>
                <Show when=move || hovered.get()>
                    <button
                        class="icon delete"
                        title="Удалить строку"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_delete.run(());
                        }
                    >
                        "🗑"
                    </button>
                </Show>
            </div>
        </div>
    }
}
