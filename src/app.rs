//! Estimate Table App
//!
//! Root component: provides state, loads the rows, lays out the page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{EstimateTable, Navbar};
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::controller;
use crate::store::AppState;

#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    let store = Store::new(AppState::new());
    let reload_trigger = signal(0u32);
    let ctx = AppContext::new(reload_trigger, config);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load rows on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        log::debug!("loading rows, trigger={}", trigger);
        let service = ctx.service();
        spawn_local(async move {
            controller::refetch(&service, &store).await;
        });
    });

    view! {
        <Navbar />
        <main class="main-content">
            <EstimateTable />
        </main>
    }
}
