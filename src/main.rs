#![allow(warnings)]
//! BoM Studio Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod effects;
mod logging;
mod markdown;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = config::load();
    logging::init(config.log_level().unwrap_or(log::LevelFilter::Info));
    log::info!("[APP] Starting against {}", config.api_base_url);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
