//! BoM Studio Frontend App
//!
//! Wizard shell: step bar, the active step, navigation, plus the floating
//! chat panel and toasts.

use leptos::prelude::*;

use bom_core::session::WizardStep;
use bom_core::{Action, AppConfig};

use crate::components::{
    CatalogStep, ChatWidget, ReviewPanel, ScenarioFormView, StepBar, Toasts, VehicleSelector, WizardNav,
};
use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);

    // Provide context to all children
    provide_context(ctx);
    provide_context(ctx.store);

    // Load manufacturers on mount
    Effect::new(move |_| {
        ctx.dispatch(Action::Start);
    });

    let step = move || ctx.store.session().with(|s| s.step);

    view! {
        <div class="app-layout">
            <main class="main-content">
                <h1>"BoM Studio"</h1>
                <StepBar />

                <section class="step-body">
                    {move || match step() {
                        WizardStep::Vehicle => view! { <VehicleSelector /> }.into_any(),
                        WizardStep::Catalog => view! { <CatalogStep /> }.into_any(),
                        WizardStep::Scenario => view! { <ScenarioFormView /> }.into_any(),
                        WizardStep::Review => view! { <ReviewPanel /> }.into_any(),
                    }}
                </section>

                <WizardNav />
            </main>

            <ChatWidget />
            <Toasts />
        </div>
    }
}
