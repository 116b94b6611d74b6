//! Catalog Step Component
//!
//! Top-level filter plus the parts list, shown either as the flat BoM
//! table or as the category tree.

use leptos::prelude::*;

use crate::components::{AiPanel, BomTable, CategoryFilter, CategoryTreeView};
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[derive(Clone, Copy, PartialEq)]
enum CatalogMode {
    Table,
    Tree,
}

#[component]
pub fn CatalogStep() -> impl IntoView {
    let ctx = use_app_context();
    let (mode, set_mode) = signal(CatalogMode::Table);

    let vehicle = move || {
        ctx.store.session().with(|s| {
            s.vehicle_selection()
                .map(|v| format!("{} {} · {}", v.brand, v.model_name, v.engine))
                .unwrap_or_default()
        })
    };

    let mode_btn = move |target: CatalogMode, label: &'static str| {
        view! {
            <button
                class=move || if mode.get() == target { "mode-btn active" } else { "mode-btn" }
                on:click=move |_| set_mode.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="catalog-step">
            <h2 class="vehicle-title">{vehicle}</h2>

            <div class="catalog-toolbar">
                <CategoryFilter />
                <div class="mode-switch">
                    {mode_btn(CatalogMode::Table, "Parts list")}
                    {mode_btn(CatalogMode::Tree, "Category tree")}
                </div>
            </div>

            {move || match mode.get() {
                CatalogMode::Table => view! { <BomTable /> }.into_any(),
                CatalogMode::Tree => view! { <CategoryTreeView /> }.into_any(),
            }}

            <AiPanel />
        </div>
    }
}
