//! Estimate Table Frontend Entry Point

mod app;
mod cache;
mod commands;
mod components;
mod config;
mod context;
mod controller;
mod editor;
mod logging;
mod models;
mod store;
mod tree;

use app::App;
use config::ApiConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = ApiConfig::load();
    logging::init(config.log_level);
    log::info!("row service at {}", config.base_url);
    mount_to_body(move || view! { <App config=config /> });
}
