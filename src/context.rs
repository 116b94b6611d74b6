//! Application Context
//!
//! Shared handles provided via Leptos Context API: the store, the loaded
//! configuration and the picked CSV files (browser `File`s are not `Send`,
//! so they live in local storage next to the store rather than inside it).

use leptos::prelude::*;
use web_sys::File;

use bom_core::notify::Level;
use bom_core::scenario::{ScenarioEdit, UploadSlot, UploadedFile};
use bom_core::{Action, AppConfig};

use crate::effects;
use crate::store::{store_notify, AppState, AppStateStoreFields, AppStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    pub config: StoredValue<AppConfig>,
    uploads: StoredValue<Vec<(UploadSlot, File)>, LocalStorage>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: AppStore::new(AppState::new(&config)),
            config: StoredValue::new(config),
            uploads: StoredValue::new_local(Vec::new()),
        }
    }

    pub fn api_base(&self) -> String {
        self.config.with_value(|c| c.api_base_url.clone())
    }

    /// Run an action through the session reducer and execute its effects
    pub fn dispatch(&self, action: Action) {
        let effects = self.store.session().write().apply(action);
        for effect in effects {
            effects::run(*self, effect);
        }
    }

    /// Show a toast that disappears after the configured delay
    pub fn notify(&self, level: Level, text: String) {
        let id = store_notify(&self.store, level, text);
        let ttl = self.config.with_value(|c| c.notification_ttl_ms);
        effects::dismiss_later(*self, id, ttl);
    }

    /// Keep the picked file and record its metadata in the scenario
    pub fn attach_file(&self, slot: UploadSlot, file: File) {
        let meta = UploadedFile {
            name: file.name(),
            size_bytes: file.size() as u64,
        };
        self.uploads.update_value(|files| {
            files.retain(|(s, _)| *s != slot);
            files.push((slot, file));
        });
        self.dispatch(Action::ScenarioEdited(ScenarioEdit::Attach(slot, meta)));
    }

    pub fn clear_file(&self, slot: UploadSlot) {
        self.uploads.update_value(|files| files.retain(|(s, _)| *s != slot));
        self.dispatch(Action::ScenarioEdited(ScenarioEdit::Clear(slot)));
    }

    /// Picked files for the given slots, in the same order
    pub fn files_for(&self, slots: &[UploadSlot]) -> Vec<(UploadSlot, File)> {
        self.uploads.with_value(|files| {
            slots
                .iter()
                .filter_map(|slot| files.iter().find(|(s, _)| s == slot).cloned())
                .collect()
        })
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
