//! Category Tree View Component
//!
//! Collapsible view of the (filtered) category hierarchy. Expansion state
//! lives in the store so it survives switching between table and tree.

use leptos::prelude::*;

use bom_core::catalog::{expand_all, visible_rows};

use crate::components::TreeRow;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn CategoryTreeView() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let node_count = move || store.session().with(|s| s.catalog_view().map(|v| v.node_count).unwrap_or(0));

    // (index, key, id, name, path, depth, has_children, expanded)
    let rows = move || {
        let expanded = store.expanded().get();
        store.session().with(|s| {
            let Some(view) = s.catalog_view() else {
                return Vec::new();
            };
            visible_rows(&view.tree, &expanded)
                .into_iter()
                .enumerate()
                .map(|(index, row)| {
                    let open = expanded.contains(&row.key);
                    (
                        index,
                        row.key,
                        row.item.category_id.clone(),
                        row.item.category_name.clone(),
                        row.item.full_path.clone(),
                        row.depth,
                        row.item.has_children,
                        open,
                    )
                })
                .collect::<Vec<_>>()
        })
    };

    let expand = move |_| {
        let all = store
            .session()
            .with_untracked(|s| s.catalog_view().map(|v| expand_all(&v.tree)).unwrap_or_default());
        log::debug!("[CATALOG] Expanding {} nodes", all.len());
        store.expanded().set(all);
    };
    let collapse = move |_| store.expanded().write().clear();

    view! {
        <div class="tree-view">
            <div class="tree-toolbar">
                <span class="node-count">{move || format!("{} categories", node_count())}</span>
                <button on:click=expand>"Expand all"</button>
                <button on:click=collapse>"Collapse all"</button>
            </div>

            <Show
                when=move || { node_count() > 0 }
                fallback=|| view! { <p class="empty-hint">"No categories to show."</p> }
            >
                <For
                    each=rows
                    key=|row| (row.0, row.1.clone(), row.7)
                    children=|(_, key, id, name, path, depth, has_children, expanded)| view! {
                        <TreeRow
                            node_key=key
                            category_id=id
                            name=name
                            full_path=path
                            depth=depth
                            has_children=has_children
                            expanded=expanded
                        />
                    }
                />
            </Show>
        </div>
    }
}
