//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::commands::HttpRowService;
use crate::config::ApiConfig;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload rows from the service - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload rows from the service - write
    set_reload_trigger: WriteSignal<u32>,
    config: StoredValue<ApiConfig>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), config: ApiConfig) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            config: StoredValue::new(config),
        }
    }

    /// Trigger a reload of rows
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Client for the configured row service
    pub fn service(&self) -> HttpRowService {
        self.config.with_value(HttpRowService::new)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
