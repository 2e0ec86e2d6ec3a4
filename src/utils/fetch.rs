//! Browser transport over the Fetch API with timeout support.

use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;
use crate::core::transport::{HttpResponse, RequestBody, Transport};

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Resolves to undefined when the timer fires
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Fetch Transport
// =============================================================================

/// [`Transport`] backed by `window.fetch`.
///
/// Every response is returned with its status, so callers can read device
/// error payloads carried by non-2xx replies.
#[derive(Clone, Copy, Debug)]
pub struct FetchTransport {
    timeout_ms: i32,
}

impl FetchTransport {
    pub fn new(timeout_ms: i32) -> Self {
        Self { timeout_ms }
    }

    async fn send(&self, request: Request) -> Result<HttpResponse, FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;
        let fetch_promise = window.fetch_with_request(&request);

        match race_with_timeout(fetch_promise, self.timeout_ms).await {
            RaceResult::TimedOut => Err(FetchError::Timeout),
            RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
            RaceResult::Completed(result) => {
                let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;

                let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                    .await
                    .map_err(|_| FetchError::ResponseReadFailed)?;
                let body = text.as_string().ok_or(FetchError::InvalidContent)?;

                Ok(HttpResponse::new(resp.status(), body))
            }
        }
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(FETCH_TIMEOUT_MS)
    }
}

fn request_init(method: &str) -> RequestInit {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    opts
}

impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let opts = request_init("GET");
        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|_| FetchError::RequestCreationFailed)?;
        self.send(request).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: RequestBody<'_>,
    ) -> Result<HttpResponse, FetchError> {
        let opts = request_init("POST");

        let js_headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
        for (name, value) in headers {
            js_headers
                .set(name, value)
                .map_err(|_| FetchError::RequestCreationFailed)?;
        }
        opts.set_headers(&js_headers);

        match body {
            RequestBody::Text(text) => opts.set_body(&JsValue::from_str(text)),
            RequestBody::Binary(bytes) => opts.set_body(&Uint8Array::from(bytes)),
        }

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|_| FetchError::RequestCreationFailed)?;
        self.send(request).await
    }
}
