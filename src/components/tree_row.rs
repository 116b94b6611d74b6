//! Tree Row Component
//!
//! One category in the tree view.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::store_toggle_expanded;

/// A single category row, indented by depth
#[component]
pub fn TreeRow(
    /// Expansion key (ID chain from the top level)
    node_key: String,
    category_id: String,
    name: String,
    full_path: String,
    depth: usize,
    has_children: bool,
    expanded: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let indent = depth * 20;
    let label = if name.is_empty() { "(unnamed)".to_string() } else { name };

    view! {
        <div
            class=if has_children { "tree-row branch" } else { "tree-row leaf" }
            style=format!("padding-left: {}px;", indent)
            title=full_path
        >
            {if has_children {
                view! {
                    <button class="collapse-btn" on:click=move |_| store_toggle_expanded(&ctx.store, &node_key)>
                        {if expanded { "▼" } else { "▶" }}
                    </button>
                }.into_any()
            } else {
                view! { <span class="collapse-placeholder">"·"</span> }.into_any()
            }}
            <span class="tree-text">{label}</span>
            <span class="tree-id">{category_id}</span>
        </div>
    }
}
