//! Review Panel Component
//!
//! Summary of the chosen vehicle and scenario, and the two job buttons.

use leptos::prelude::*;

use bom_core::scenario::JobKind;
use bom_core::{Action, Remote};

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn ReviewPanel() -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();

    let vehicle = move || {
        session.with(|s| match s.vehicle_selection() {
            Some(v) => format!("{} {} · {} (vehicle {})", v.brand, v.model_name, v.engine, v.vehicle_id),
            None => "No vehicle selected".to_string(),
        })
    };
    let part_count = move || session.with(|s| s.catalog_view().map_or(0, |v| v.parts.len()));

    let scenario_rows = move || {
        session.with(|s| {
            let form = &s.scenario;
            let mut rows = vec![
                ("Inflation", format!("{}%", form.inflation_rate.trim())),
                ("VAT", format!("{}%", form.vat_rate.trim())),
                ("Report name", form.report_name.trim().to_string()),
            ];
            for tariff in &form.tariffs {
                rows.push(("Tariff", format!("{}: {}%", tariff.country.trim(), tariff.rate.trim())));
            }
            for file in [&form.bom_csv, &form.supplier_csv].into_iter().flatten() {
                rows.push(("File", file.name.clone()));
            }
            rows
        })
    };

    let submitting = move || session.with(|s| s.job.is_loading());
    let job_button = move |kind: JobKind| {
        view! {
            <button
                class="primary"
                disabled=submitting
                on:click=move |_| ctx.dispatch(Action::SubmitRequested(kind))
            >
                {kind.label()}
            </button>
        }
    };

    view! {
        <div class="review-panel">
            <section>
                <h3>"Vehicle"</h3>
                <p>{vehicle}</p>
                <p class="hint">{move || format!("{} parts in the bill of materials", part_count())}</p>
            </section>

            <section>
                <h3>"Scenario"</h3>
                <table class="summary">
                    <tbody>
                        {move || scenario_rows().into_iter().map(|(key, value)| view! {
                            <tr><th>{key}</th><td>{value}</td></tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </section>

            <div class="job-actions">
                {job_button(JobKind::Report)}
                {job_button(JobKind::Simulation)}
            </div>

            {move || session.with(|s| match &s.job {
                Remote::Idle => ().into_any(),
                Remote::Loading { .. } => view! { <p class="hint">"Submitting..."</p> }.into_any(),
                Remote::Error(reason) => view! { <p class="field-error">{reason.clone()}</p> }.into_any(),
                Remote::Loaded(ack) => {
                    let text = serde_json::to_string_pretty(ack).unwrap_or_else(|_| ack.to_string());
                    view! {
                        <div class="job-ack">
                            <h4>"Server response"</h4>
                            <pre>{text}</pre>
                        </div>
                    }.into_any()
                }
            })}
        </div>
    }
}
