//! Chat Widget Component
//!
//! Floating assistant panel. Replies are markdown, rendered to sanitized
//! HTML before display.

use leptos::prelude::*;

use bom_core::chat::Role;

use crate::context::use_app_context;
use crate::effects;
use crate::markdown::parse_markdown;
use crate::store::AppStateStoreFields;

#[component]
pub fn ChatWidget() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let assistant = ctx.config.with_value(|c| c.assistant_name.clone());
    let (draft, set_draft) = signal(String::new());

    let pending = move || store.chat().with(|c| c.pending);

    let send = move || {
        let text = draft.get_untracked();
        if text.trim().is_empty() || pending() {
            return;
        }
        set_draft.set(String::new());
        effects::send_chat(ctx, text);
    };

    view! {
        <div class=move || if store.chat_open().get() { "chat-widget open" } else { "chat-widget" }>
            <button class="chat-toggle" on:click=move |_| store.chat_open().update(|open| *open = !*open)>
                {assistant.clone()}
            </button>

            <Show when=move || store.chat_open().get()>
                <div class="chat-panel">
                    <div class="chat-header">
                        <span>{assistant.clone()}</span>
                        <button class="clear-btn" on:click=move |_| store.chat().write().clear()>"Clear"</button>
                    </div>

                    <div class="chat-messages">
                        {move || store.chat().with(|c| c.messages.iter().map(|m| {
                            let class = match m.role {
                                Role::User => "chat-msg user",
                                Role::Assistant => "chat-msg assistant",
                                Role::System => "chat-msg system",
                            };
                            let time = m.sent_at.with_timezone(&chrono::Local).format("%H:%M").to_string();
                            let html = match m.role {
                                Role::Assistant => parse_markdown(&m.text),
                                _ => String::new(),
                            };
                            let text = m.text.clone();
                            view! {
                                <div class=class>
                                    {if html.is_empty() {
                                        view! { <p>{text}</p> }.into_any()
                                    } else {
                                        view! { <div class="markdown" inner_html=html></div> }.into_any()
                                    }}
                                    <span class="chat-time">{time}</span>
                                </div>
                            }
                        }).collect_view())}
                        <Show when=pending>
                            <div class="chat-msg assistant typing">"..."</div>
                        </Show>
                    </div>

                    <form class="chat-input" on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        send();
                    }>
                        <input
                            type="text"
                            placeholder="Ask about this bill of materials..."
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=pending>"Send"</button>
                    </form>
                </div>
            </Show>
        </div>
    }
}
