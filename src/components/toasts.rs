//! Toasts Component
//!
//! Stack of transient notifications in the corner of the screen.

use leptos::prelude::*;

use crate::store::{store_dismiss, use_app_store, AppStateStoreFields};

#[component]
pub fn Toasts() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toasts">
            <For
                each=move || store.notifications().with(|n| n.items().to_vec())
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.level.css_class() role="status">
                            <span>{n.text}</span>
                            <button class="toast-close" on:click=move |_| store_dismiss(&store, id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
