//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cache::RowCache;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Row tree fetched from the service, plus the draft slot
    pub cache: RowCache,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cache: RowCache::new(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Shared state the controller reads and mutates across await points.
///
/// Both methods return `None` once the backing state is gone, e.g. a
/// row's signal disposed because the row was re-rendered.
pub trait StateCell<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;

    /// Mutate and notify readers
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl StateCell<RowCache> for AppStore {
    fn read_with<R>(&self, f: impl FnOnce(&RowCache) -> R) -> Option<R> {
        self.cache().try_with_untracked(f)
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut RowCache) -> R) -> Option<R> {
        self.cache().try_update(f)
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl<T> StateCell<T> for Rc<RefCell<T>> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}
