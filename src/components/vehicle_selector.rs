//! Vehicle Selector Component
//!
//! Brand -> model -> engine cascade. Each choice clears everything below it
//! and starts the next lookup.

use leptos::prelude::*;

use bom_core::{Action, Remote};

use crate::components::{FieldView, RemoteSelect};
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn VehicleSelector() -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.store.session();

    let brands = Signal::derive(move || {
        session.with(|s| FieldView::from_remote(&s.manufacturers, |m| (m.manufacturer_id, m.brand.clone())))
    });
    let models = Signal::derive(move || {
        session.with(|s| FieldView::from_remote(&s.models, |m| (m.model_id, m.model_name.clone())))
    });
    let engines = Signal::derive(move || {
        session.with(|s| FieldView::from_remote(&s.engines, |e| (e.vehicle_id, e.label())))
    });

    let catalog_status = move || {
        session.with(|s| match &s.categories {
            Remote::Idle => None,
            Remote::Loading { .. } => Some(("catalog-status loading", "Loading parts catalog...".to_string())),
            Remote::Error(reason) => Some(("catalog-status error", reason.clone())),
            Remote::Loaded(_) => s.catalog_view().map(|v| {
                (
                    "catalog-status ready",
                    format!("{} parts in {} categories", v.parts.len(), v.node_count),
                )
            }),
        })
    };

    view! {
        <div class="vehicle-selector">
            <RemoteSelect
                label="Brand"
                idle_hint="Waiting for brands..."
                field=brands
                selected=Signal::derive(move || session.with(|s| s.selected_brand))
                on_change=move |id| ctx.dispatch(Action::BrandSelected(id))
            />
            <RemoteSelect
                label="Model"
                idle_hint="Choose a brand first"
                field=models
                selected=Signal::derive(move || session.with(|s| s.selected_model))
                on_change=move |id| ctx.dispatch(Action::ModelSelected(id))
            />
            <RemoteSelect
                label="Engine"
                idle_hint="Choose a model first"
                field=engines
                selected=Signal::derive(move || session.with(|s| s.selected_engine))
                on_change=move |id| ctx.dispatch(Action::EngineSelected(id))
            />

            {move || catalog_status().map(|(class, text)| view! {
                <p class=class>{text}</p>
            })}
        </div>
    }
}
