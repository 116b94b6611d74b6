//! Backend HTTP Bindings
//!
//! Thin wrappers over the browser `fetch` API, organized by domain.
//! Responses are read as text and decoded with serde_json so that object
//! key order (the category display order) survives.

mod catalog;
mod chat;
mod jobs;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use bom_core::api::{Endpoint, Method};
use bom_core::{AppError, AppResult};

// Re-export all public items
pub use catalog::*;
pub use chat::*;
pub use jobs::*;

/// Request payloads the backend accepts
pub enum Body {
    Json(String),
    Form(FormData),
}

/// Stringify a rejected JS promise or thrown value
fn js_error(value: JsValue) -> AppError {
    let text = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    AppError::Network(text)
}

/// Perform a request and return the body of a 2xx response
async fn send(
    base: &str,
    endpoint: &Endpoint,
    body: Option<Body>,
    bearer: Option<&str>,
) -> AppResult<String> {
    let url = endpoint.url(base);
    let method = endpoint.method();

    let opts = RequestInit::new();
    opts.set_method(method.as_str());
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(js_error)?;
    headers.set("Accept", "application/json").map_err(js_error)?;
    if let Some(token) = bearer {
        headers
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(js_error)?;
    }
    match body {
        Some(Body::Json(json)) => {
            headers.set("Content-Type", "application/json").map_err(js_error)?;
            opts.set_body(&JsValue::from_str(&json));
        }
        // the browser sets the multipart boundary itself
        Some(Body::Form(form)) => opts.set_body(&form),
        None => {}
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    let window = web_sys::window().ok_or_else(|| AppError::Network("no window".into()))?;

    log::debug!("[API] {} {}", method.as_str(), url);
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| AppError::UnexpectedShape("fetch did not return a Response".into()))?;

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        log::warn!("[API] {} {} -> {}", method.as_str(), url, response.status());
        return Err(AppError::Http {
            status: response.status(),
            body: text,
        });
    }
    Ok(text)
}

async fn get_json<T: DeserializeOwned>(base: &str, endpoint: &Endpoint) -> AppResult<T> {
    debug_assert_eq!(endpoint.method(), Method::Get);
    let text = send(base, endpoint, None, None).await?;
    Ok(serde_json::from_str(&text)?)
}

async fn post_json<T: DeserializeOwned>(
    base: &str,
    endpoint: &Endpoint,
    body: Option<Body>,
    bearer: Option<&str>,
) -> AppResult<T> {
    let text = send(base, endpoint, body, bearer).await?;
    Ok(serde_json::from_str(&text)?)
}
