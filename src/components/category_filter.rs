//! Category Filter Component
//!
//! Restricts the catalog to one top-level category (or all of them).

use leptos::prelude::*;

use bom_core::{Action, TopLevelFilter};

use crate::context::use_app_context;
use crate::store::{store_reset_catalog_view, AppStateStoreFields};

#[component]
pub fn CategoryFilter() -> impl IntoView {
    let ctx = use_app_context();

    let options = move || {
        ctx.store
            .session()
            .with(|s| s.catalog_view().map(|v| v.top_level.clone()).unwrap_or_default())
    };
    let current = move || ctx.store.session().with(|s| s.filter.as_str().to_string());

    view! {
        <label class="category-filter">
            <span class="field-label">"Category"</span>
            <select
                prop:value=current
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    log::debug!("[CATALOG] Filter changed to {}", value);
                    store_reset_catalog_view(&ctx.store);
                    ctx.dispatch(Action::FilterChanged(TopLevelFilter::from(value)));
                }
            >
                <option value=TopLevelFilter::ALL>"All categories"</option>
                {move || options().into_iter().map(|(id, name)| view! {
                    <option value=id>{name}</option>
                }).collect_view()}
            </select>
        </label>
    }
}
