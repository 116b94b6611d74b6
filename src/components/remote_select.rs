//! Remote Select Component
//!
//! A dropdown fed by the backend, rendered per field state:
//! idle (waiting for the parent choice), loading, error or loaded.

use leptos::prelude::*;

use bom_core::Remote;

/// Render-ready projection of a `Remote<Vec<_>>` list
#[derive(Debug, Clone, PartialEq)]
pub enum FieldView {
    Idle,
    Loading,
    Error(String),
    Loaded(Vec<(u64, String)>),
}

impl FieldView {
    pub fn from_remote<T>(remote: &Remote<Vec<T>>, option: impl Fn(&T) -> (u64, String)) -> Self {
        match remote {
            Remote::Idle => FieldView::Idle,
            Remote::Loading { .. } => FieldView::Loading,
            Remote::Error(reason) => FieldView::Error(reason.clone()),
            Remote::Loaded(items) => FieldView::Loaded(items.iter().map(option).collect()),
        }
    }
}

#[component]
pub fn RemoteSelect(
    #[prop(into)] label: String,
    /// Shown while the parent field has no value yet
    #[prop(into)]
    idle_hint: String,
    #[prop(into)] field: Signal<FieldView>,
    #[prop(into)] selected: Signal<Option<u64>>,
    #[prop(into)] on_change: Callback<Option<u64>>,
) -> impl IntoView {
    view! {
        <label class="remote-select">
            <span class="field-label">{label}</span>
            {move || match field.get() {
                FieldView::Idle => view! {
                    <select disabled=true><option>{idle_hint.clone()}</option></select>
                }.into_any(),
                FieldView::Loading => view! {
                    <select disabled=true><option>"Loading..."</option></select>
                }.into_any(),
                FieldView::Error(reason) => view! {
                    <div class="field-error">{reason}</div>
                }.into_any(),
                FieldView::Loaded(options) => view! {
                    <select
                        prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            on_change.run(value.parse::<u64>().ok());
                        }
                    >
                        <option value="">"— select —"</option>
                        {options.into_iter().map(|(id, text)| view! {
                            <option value=id.to_string()>{text}</option>
                        }).collect_view()}
                    </select>
                }.into_any(),
            }}
        </label>
    }
}
