//! AI Panel Component
//!
//! Sends the visible parts list for analysis and shows the raw result.

use leptos::prelude::*;

use bom_core::{Action, Remote};

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn AiPanel() -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();

    let busy = move || session.with(|s| s.ai_result.is_loading());
    let no_parts = move || session.with(|s| s.catalog_view().map_or(true, |v| v.parts.is_empty()));

    view! {
        <section class="ai-panel">
            <div class="ai-header">
                <h3>"AI analysis"</h3>
                <button
                    class="primary"
                    disabled=move || busy() || no_parts()
                    on:click=move |_| ctx.dispatch(Action::AiRequested)
                >
                    {move || if busy() { "Analysing..." } else { "Analyse parts" }}
                </button>
            </div>

            {move || session.with(|s| match &s.ai_result {
                Remote::Idle => view! {
                    <p class="hint">"Run an analysis to see the AI summary of this bill of materials."</p>
                }.into_any(),
                Remote::Loading { .. } => view! { <p class="hint">"Waiting for the server..."</p> }.into_any(),
                Remote::Error(reason) => view! { <p class="field-error">{reason.clone()}</p> }.into_any(),
                Remote::Loaded(value) => {
                    // shown as returned; the payload shape is not fixed
                    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                    view! { <pre class="ai-result">{text}</pre> }.into_any()
                }
            })}
        </section>
    }
}
