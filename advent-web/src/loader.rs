//! Browser transports for the question document.
//!
//! `fetch` is tried first; an `XMLHttpRequest` fallback covers pages opened
//! from `file://`, where `fetch` refuses local files but XHR still returns
//! the body with status 0.

use crate::dom;
use advent_core::{DocumentSource, FallbackSource, SourceError};
use async_trait::async_trait;
use gloo::net::http::Request;
use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::XmlHttpRequest;

/// Resolve a document name against the page-relative `base`.
#[must_use]
pub fn document_url(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    let name = name.trim_start_matches("./").trim_start_matches('/');
    if base.is_empty() {
        format!("./{name}")
    } else {
        format!("{base}/{name}")
    }
}

fn transport_error(value: &JsValue) -> SourceError {
    SourceError::Transport(dom::js_error_message(value))
}

#[derive(Debug, Clone, Default)]
pub struct FetchSource {
    base: String,
}

impl FetchSource {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait(?Send)]
impl DocumentSource for FetchSource {
    async fn fetch_document(&self, name: &str) -> Result<String, SourceError> {
        let url = document_url(&self.base, name);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(SourceError::Status {
                name: name.to_string(),
                status: response.status(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct XhrSource {
    base: String,
}

impl XhrSource {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

/// Status 0 with a body is what browsers report for `file://` reads.
#[must_use]
pub fn xhr_status_ok(status: u16, body: &str) -> bool {
    status == 200 || (status == 0 && !body.is_empty())
}

#[async_trait(?Send)]
impl DocumentSource for XhrSource {
    async fn fetch_document(&self, name: &str) -> Result<String, SourceError> {
        let url = document_url(&self.base, name);
        let xhr = XmlHttpRequest::new().map_err(|e| transport_error(&e))?;
        xhr.open_with_async("GET", &url, true)
            .map_err(|e| transport_error(&e))?;
        xhr.override_mime_type("application/json")
            .map_err(|e| transport_error(&e))?;

        let promise = Promise::new(&mut |resolve, reject| {
            let on_load = Closure::once_into_js(move || {
                let _ = resolve.call0(&JsValue::UNDEFINED);
            });
            let on_error = Closure::once_into_js(move || {
                let _ = reject.call1(&JsValue::UNDEFINED, &JsValue::from_str("network error"));
            });
            xhr.set_onload(Some(on_load.unchecked_ref()));
            xhr.set_onerror(Some(on_error.unchecked_ref()));
        });
        xhr.send().map_err(|e| transport_error(&e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| transport_error(&e))?;

        let status = xhr.status().map_err(|e| transport_error(&e))?;
        let body = xhr
            .response_text()
            .map_err(|e| transport_error(&e))?
            .unwrap_or_default();
        if xhr_status_ok(status, &body) {
            Ok(body)
        } else {
            Err(SourceError::Status {
                name: name.to_string(),
                status,
            })
        }
    }
}

pub type BrowserSource = FallbackSource<FetchSource, XhrSource>;

/// `fetch` with XHR fallback, both relative to the page.
#[must_use]
pub fn browser_source() -> BrowserSource {
    FallbackSource::new(FetchSource::new("."), XhrSource::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_url_joins_relative_to_page() {
        assert_eq!(document_url(".", "questions.json"), "./questions.json");
        assert_eq!(document_url("", "questions.json"), "./questions.json");
        assert_eq!(document_url("data/", "/q.json"), "data/q.json");
        assert_eq!(document_url(".", "./q.json"), "./q.json");
    }

    #[test]
    fn xhr_accepts_file_scheme_bodies_only_when_non_empty() {
        assert!(xhr_status_ok(200, ""));
        assert!(xhr_status_ok(0, "[]"));
        assert!(!xhr_status_ok(0, ""));
        assert!(!xhr_status_ok(404, "not found"));
    }
}
