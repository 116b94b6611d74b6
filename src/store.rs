//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The wizard
//! session itself is owned by bom-core; the store only wraps it together
//! with UI-only state (toasts, chat, table paging, tree expansion).

use std::collections::HashSet;

use leptos::prelude::*;
use reactive_stores::Store;

use bom_core::chat::ChatTranscript;
use bom_core::notify::{Level, Notifications};
use bom_core::table::Pagination;
use bom_core::{AppConfig, Session};
use bom_core::catalog::ProcessOptions;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// Wizard session (selection cascade, catalog, scenario, jobs)
    pub session: Session,
    /// Toasts currently on screen
    pub notifications: Notifications,
    /// Assistant chat transcript
    pub chat: ChatTranscript,
    /// BoM table paging
    pub pagination: Pagination,
    /// BoM table search box
    pub search: String,
    /// Keys of the tree nodes currently expanded
    pub expanded: HashSet<String>,
    /// Whether the chat panel is open
    pub chat_open: bool,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: Session::new(ProcessOptions::from_config(config)),
            notifications: Notifications::default(),
            chat: ChatTranscript::default(),
            pagination: Pagination::new(config.page_size),
            search: String::new(),
            expanded: HashSet::new(),
            chat_open: false,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Queue a toast, returning its id
pub fn store_notify(store: &AppStore, level: Level, text: String) -> u32 {
    store.notifications().write().push(level, text)
}

/// Remove a toast by id
pub fn store_dismiss(store: &AppStore, id: u32) {
    store.notifications().write().dismiss(id);
}

/// Update the search box and jump back to the first page
pub fn store_set_search(store: &AppStore, query: String) {
    store.search().set(query);
    store.pagination().update(|p| *p = p.first());
}

/// Expand or collapse one tree node, by its `VisibleRow::key`
pub fn store_toggle_expanded(store: &AppStore, node_key: &str) {
    store.expanded().update(|set| {
        if !set.remove(node_key) {
            set.insert(node_key.to_string());
        }
    });
}

/// Forget table/tree view state when a new catalog or filter is shown
pub fn store_reset_catalog_view(store: &AppStore) {
    store.expanded().write().clear();
    store.search().set(String::new());
    store.pagination().update(|p| *p = p.first());
}
