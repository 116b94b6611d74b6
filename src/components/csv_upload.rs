//! CSV Upload Component
//!
//! File pickers for the BoM and supplier CSVs, plus the country lookup
//! that needs both of them.

use leptos::prelude::*;

use bom_core::scenario::UploadSlot;
use bom_core::{Action, Remote};

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

/// Picker for one upload slot
#[component]
fn UploadField(slot: UploadSlot) -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();

    let picked = move || {
        session.with(|s| {
            s.scenario
                .upload(slot)
                .map(|f| (f.name.clone(), f.size_bytes, f.is_csv()))
        })
    };

    view! {
        <div class="upload-field">
            <span class="field-label">{slot.label()}</span>
            <input
                type="file"
                accept=".csv,text/csv"
                on:change=move |ev| {
                    let input = event_target::<web_sys::HtmlInputElement>(&ev);
                    match input.files().and_then(|files| files.get(0)) {
                        Some(file) => {
                            log::info!("[JOB] Picked {} for {}", file.name(), slot.field_name());
                            ctx.attach_file(slot, file);
                        }
                        None => ctx.clear_file(slot),
                    }
                }
            />
            {move || picked().map(|(name, size, is_csv)| view! {
                <span class=if is_csv { "upload-meta" } else { "upload-meta warn" }>
                    {format!("{} ({} KB)", name, size.div_ceil(1024))}
                </span>
                <button class="clear-btn" on:click=move |_| ctx.clear_file(slot)>"×"</button>
            })}
        </div>
    }
}

#[component]
pub fn CsvUpload() -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();

    let can_find = move || session.with(|s| s.scenario.can_find_countries() && !s.countries.is_loading());

    view! {
        <fieldset class="csv-upload">
            <legend>"Data files"</legend>
            <UploadField slot=UploadSlot::Bom />
            <UploadField slot=UploadSlot::Supplier />

            <div class="countries-row">
                <button disabled=move || !can_find() on:click=move |_| ctx.dispatch(Action::FindCountries)>
                    "Find countries"
                </button>
                {move || session.with(|s| match &s.countries {
                    Remote::Idle => view! {
                        <span class="hint">"Countries from the uploads become tariff choices."</span>
                    }.into_any(),
                    Remote::Loading { .. } => view! { <span class="hint">"Reading uploads..."</span> }.into_any(),
                    Remote::Error(reason) => view! { <span class="field-error">{reason.clone()}</span> }.into_any(),
                    Remote::Loaded(countries) => view! {
                        <span class="hint">{format!("{} countries: {}", countries.len(), countries.join(", "))}</span>
                    }.into_any(),
                })}
            </div>
        </fieldset>
    }
}
