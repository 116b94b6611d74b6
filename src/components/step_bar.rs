//! Step Bar Component
//!
//! Wizard progress tabs and the back/next buttons.

use leptos::prelude::*;

use bom_core::session::WizardStep;
use bom_core::Action;

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

/// Clickable step tabs; unreachable steps are disabled with a reason
#[component]
pub fn StepBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="step-bar">
            {WizardStep::ALL.iter().map(|step| {
                let step = *step;
                let is_current = move || ctx.store.session().with(|s| s.step == step);
                let blocked = move || ctx.store.session().with(|s| step.blocked_reason(s));
                view! {
                    <button
                        class=move || if is_current() { "step-tab active" } else { "step-tab" }
                        disabled=move || blocked().is_some()
                        title=move || blocked().unwrap_or_default()
                        on:click=move |_| ctx.dispatch(Action::StepTo(step))
                    >
                        <span class="step-index">{step.index() + 1}</span>
                        {step.title()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}

/// Back / Next buttons under the active step
#[component]
pub fn WizardNav() -> impl IntoView {
    let ctx = use_app_context();

    let step = move || ctx.store.session().with(|s| s.step);
    let next_blocked = move || {
        ctx.store.session().with(|s| match s.step.next() {
            Some(next) => !next.can_enter(s),
            None => true,
        })
    };

    view! {
        <div class="wizard-nav">
            <button
                class="nav-btn"
                disabled=move || step().prev().is_none()
                on:click=move |_| ctx.dispatch(Action::Back)
            >
                "← Back"
            </button>
            <Show when=move || step().next().is_some()>
                <button
                    class="nav-btn primary"
                    disabled=next_blocked
                    on:click=move |_| ctx.dispatch(Action::Next)
                >
                    "Next →"
                </button>
            </Show>
        </div>
    }
}
