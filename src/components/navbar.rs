//! Navbar Component
//!
//! Top bar with section links and a reload button.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="navbar">
            <div class="buttons">
                <button class="icon" title="Обновить" on:click=move |_| ctx.reload()>
                    "⟳"
                </button>
            </div>
            <div class="links">
                <h4>"Просмотр"</h4>
                <h4>"Управление"</h4>
            </div>
        </div>
    }
}
