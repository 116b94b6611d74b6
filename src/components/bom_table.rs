//! BoM Table Component
//!
//! Flat list of leaf parts with search, paging and CSV export.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};

use bom_core::notify::Level;
use bom_core::table::{export_csv, paginate, search_parts};
use bom_core::PartItem;

use crate::context::use_app_context;
use crate::store::{store_set_search, AppStateStoreFields};

/// Time the browser gets to start the download before the blob URL goes away
const REVOKE_DELAY_MS: u32 = 10_000;

#[component]
pub fn BomTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    // Filtered by the search box, before paging
    let matches = Memo::new(move |_| {
        let query = store.search().get();
        store.session().with(|s| {
            s.catalog_view()
                .map(|v| search_parts(&v.parts, &query).into_iter().cloned().collect::<Vec<PartItem>>())
                .unwrap_or_default()
        })
    });
    let page = Memo::new(move |_| matches.with(|parts| paginate(parts, store.pagination().get())));

    let download = move |_| {
        let csv = matches.with(|parts| export_csv(parts));
        if let Err(e) = download_csv("bill_of_materials.csv", &csv) {
            log::error!("[CATALOG] CSV export failed: {:?}", e);
            ctx.notify(Level::Error, "Could not export the parts list".to_string());
        }
    };

    view! {
        <div class="bom-table">
            <div class="table-toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search parts or paths..."
                    prop:value=move || store.search().get()
                    on:input=move |ev| store_set_search(&store, event_target_value(&ev))
                />
                <button
                    class="export-btn"
                    disabled=move || matches.with(|m| m.is_empty())
                    on:click=download
                >
                    "Export CSV"
                </button>
            </div>

            <Show
                when=move || page.with(|p| p.total_items > 0)
                fallback=|| view! { <p class="empty-hint">"No parts match."</p> }
            >
                <table>
                    <thead>
                        <tr>
                            <th>"Part"</th>
                            <th>"Category path"</th>
                            <th>"Level"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.with(|p| p.numbered())
                            key=|(row, part)| (*row, part.category_id.clone())
                            children=|(_, part)| view! {
                                <tr>
                                    <td>{part.category_name}</td>
                                    <td class="path-cell">{part.full_path}</td>
                                    <td>{part.level}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <div class="pager">
                <button
                    disabled=move || !page.with(|p| p.has_prev())
                    on:click=move |_| store.pagination().update(|p| *p = p.prev())
                >
                    "‹ Prev"
                </button>
                <span class="pager-label">
                    {move || page.with(|p| format!("{} · page {}/{}", p.range_label(), p.page + 1, p.total_pages))}
                </span>
                <button
                    disabled=move || !page.with(|p| p.has_next())
                    on:click=move |_| store.pagination().update(|p| *p = p.next())
                >
                    "Next ›"
                </button>
            </div>
        </div>
    }
}

/// Hand `content` to the browser as a file download
fn download_csv(filename: &str, content: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    spawn_local(async move {
        TimeoutFuture::new(REVOKE_DELAY_MS).await;
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("[CATALOG] Could not revoke {}: {:?}", url, e);
        }
    });
    Ok(())
}
