//! Scenario Form Component
//!
//! Tariff shocks, inflation, VAT and the report name, with the CSV
//! uploads underneath. Every keystroke goes through the session reducer.

use leptos::prelude::*;

use bom_core::scenario::{ScenarioEdit, MAX_RATE, MIN_RATE};
use bom_core::{Action, AppError};

use crate::components::CsvUpload;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

/// One tariff line
#[component]
fn TariffRow(index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();
    let edit = move |e: ScenarioEdit| ctx.dispatch(Action::ScenarioEdited(e));

    let country = move || session.with(|s| s.scenario.tariffs.get(index).map(|t| t.country.clone()).unwrap_or_default());
    let rate = move || session.with(|s| s.scenario.tariffs.get(index).map(|t| t.rate.clone()).unwrap_or_default());
    let countries = move || session.with(|s| s.scenario.available_countries.clone());

    view! {
        <div class="tariff-row">
            {move || {
                let options = countries();
                if options.is_empty() {
                    view! {
                        <input
                            type="text"
                            placeholder="Country"
                            prop:value=country
                            on:input=move |ev| edit(ScenarioEdit::SetTariffCountry(index, event_target_value(&ev)))
                        />
                    }.into_any()
                } else {
                    view! {
                        <select
                            prop:value=country
                            on:change=move |ev| edit(ScenarioEdit::SetTariffCountry(index, event_target_value(&ev)))
                        >
                            <option value="">"Country..."</option>
                            {options.into_iter().map(|c| view! {
                                <option value=c.clone()>{c.clone()}</option>
                            }).collect_view()}
                        </select>
                    }.into_any()
                }
            }}
            <input
                type="text"
                class="rate-input"
                placeholder="Rate %"
                prop:value=rate
                on:input=move |ev| edit(ScenarioEdit::SetTariffRate(index, event_target_value(&ev)))
            />
            <button class="delete-btn" on:click=move |_| edit(ScenarioEdit::RemoveTariff(index))>"×"</button>
        </div>
    }
}

/// A labelled percentage or text input bound to one scenario field
#[component]
fn ScenarioInput(
    label: &'static str,
    placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_edit: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="scenario-input">
            <span class="field-label">{label}</span>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_edit.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn ScenarioFormView() -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();

    let tariff_count = move || session.with(|s| s.scenario.tariffs.len());
    let issues = move || {
        session.with(|s| match s.scenario.validate() {
            Err(AppError::Validation(issues)) => issues.into_iter().map(|i| i.message).collect::<Vec<String>>(),
            _ => Vec::new(),
        })
    };

    view! {
        <div class="scenario-form">
            <CsvUpload />

            <fieldset>
                <legend>"Tariff shocks"</legend>
                <p class="hint">{format!("Rates between {}% and {}%.", MIN_RATE, MAX_RATE)}</p>
                <For
                    each=move || 0..tariff_count()
                    key=|i| *i
                    children=|i| view! { <TariffRow index=i /> }
                />
                <button on:click=move |_| ctx.dispatch(Action::ScenarioEdited(ScenarioEdit::AddTariff))>
                    "+ Add tariff"
                </button>
            </fieldset>

            <fieldset>
                <legend>"Economy"</legend>
                <ScenarioInput
                    label="Inflation rate (%)"
                    placeholder="e.g. 2.5"
                    value=Signal::derive(move || session.with(|s| s.scenario.inflation_rate.clone()))
                    on_edit=move |v| ctx.dispatch(Action::ScenarioEdited(ScenarioEdit::SetInflation(v)))
                />
                <ScenarioInput
                    label="VAT rate (%)"
                    placeholder="e.g. 19"
                    value=Signal::derive(move || session.with(|s| s.scenario.vat_rate.clone()))
                    on_edit=move |v| ctx.dispatch(Action::ScenarioEdited(ScenarioEdit::SetVat(v)))
                />
                <ScenarioInput
                    label="Report name"
                    placeholder="Needed for reports"
                    value=Signal::derive(move || session.with(|s| s.scenario.report_name.clone()))
                    on_edit=move |v| ctx.dispatch(Action::ScenarioEdited(ScenarioEdit::SetReportName(v)))
                />
            </fieldset>

            <Show when=move || !issues().is_empty()>
                <ul class="issues">
                    {move || issues().into_iter().map(|text| view! { <li>{text}</li> }).collect_view()}
                </ul>
            </Show>
        </div>
    }
}
