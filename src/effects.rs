//! Effect Runner
//!
//! Executes the fetches the session reducer asks for and feeds each result
//! back as an action carrying the generation it was issued under.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use bom_core::{Action, AppError, Effect};

use crate::api;
use crate::context::AppContext;
use crate::store::{store_dismiss, store_reset_catalog_view};

pub fn run(ctx: AppContext, effect: Effect) {
    let base = ctx.api_base();
    match effect {
        Effect::LoadManufacturers { generation } => spawn_local(async move {
            let result = api::list_manufacturers(&base).await;
            if let Ok(list) = &result {
                log::info!("[VEHICLE] Loaded {} manufacturers", list.len());
            }
            ctx.dispatch(Action::ManufacturersLoaded { generation, result });
        }),

        Effect::LoadModels {
            generation,
            manufacturer_id,
        } => spawn_local(async move {
            let result = api::list_models(&base, manufacturer_id).await;
            ctx.dispatch(Action::ModelsLoaded { generation, result });
        }),

        Effect::LoadEngines {
            generation,
            manufacturer_id,
            model_id,
        } => spawn_local(async move {
            let result = api::list_engines(&base, manufacturer_id, model_id).await;
            ctx.dispatch(Action::EnginesLoaded { generation, result });
        }),

        Effect::LoadCatalog {
            generation,
            vehicle_id,
            manufacturer_id,
        } => {
            log::info!("[CATALOG] Loading categories for vehicle {}", vehicle_id);
            store_reset_catalog_view(&ctx.store);
            spawn_local(async move {
                let result = api::load_categories(&base, vehicle_id, manufacturer_id).await;
                if let Err(e) = &result {
                    log::error!("[CATALOG] Error loading vehicle {}: {}", vehicle_id, e);
                }
                ctx.dispatch(Action::CatalogLoaded { generation, result });
            })
        }

        Effect::FindCountries { generation } => {
            use bom_core::scenario::UploadSlot;
            let files = ctx.files_for(&[UploadSlot::Bom, UploadSlot::Supplier]);
            spawn_local(async move {
                let result = match files.as_slice() {
                    [(_, bom), (_, suppliers)] => api::find_countries(&base, bom, suppliers).await,
                    _ => Err(AppError::Empty("Pick both CSV files again".into())),
                };
                ctx.dispatch(Action::CountriesFound { generation, result });
            })
        }

        Effect::ProcessBom { generation, request } => spawn_local(async move {
            log::info!("[AI] Sending {} parts for analysis", request.parts.len());
            let result = api::process_bill_of_materials(&base, &request).await;
            ctx.dispatch(Action::AiFinished { generation, result });
        }),

        Effect::SubmitJob {
            generation,
            submission,
        } => {
            let files = ctx.files_for(&submission.files);
            spawn_local(async move {
                log::info!("[JOB] Submitting {:?}", submission.kind);
                let result = api::submit_job(&base, &submission, &files).await;
                ctx.dispatch(Action::JobFinished { generation, result });
            })
        }

        Effect::Notify { level, text } => ctx.notify(level, text),
    }
}

/// Remove a toast once its time is up
pub fn dismiss_later(ctx: AppContext, id: u32, ttl_ms: u32) {
    spawn_local(async move {
        TimeoutFuture::new(ttl_ms).await;
        store_dismiss(&ctx.store, id);
    });
}

/// Send one chat message, fetching a token first when needed
pub fn send_chat(ctx: AppContext, text: String) {
    use crate::store::AppStateStoreFields;

    let now = chrono::Utc::now();
    let Some(message) = ctx.store.chat().write().push_user(&text, now) else {
        return;
    };
    let base = ctx.api_base();
    let token = ctx.store.chat().with_untracked(|c| c.token.clone());

    spawn_local(async move {
        let token = match token {
            Some(token) => Ok(token),
            None => api::chat_token(&base).await,
        };
        let result = match token {
            Ok(token) => {
                ctx.store.chat().write().set_token(token.clone());
                api::send_chat(&base, &token, message).await
            }
            Err(e) => Err(e),
        };
        ctx.store.chat().write().resolve_reply(result, chrono::Utc::now());
    });
}
