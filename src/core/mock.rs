//! Scripted doubles for the transport, frontend and timer seams.
//!
//! Responses are queued per endpoint path (the URL up to `?`). Each request
//! takes the front of its queue; the last queued response is reused for any
//! further requests to that endpoint until a new one is queued.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::error::FetchError;
use crate::core::frontend::Frontend;
use crate::core::listing::ListingView;
use crate::core::reconnect::Sleep;
use crate::core::transport::{HttpResponse, RequestBody, Transport};
use crate::models::{Notification, NotificationKind};

// =============================================================================
// Transport
// =============================================================================

/// A request observed by [`MockTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<HashMap<String, VecDeque<Result<HttpResponse, FetchError>>>>,
    /// Endpoints whose only queued response has already been served
    served: RefCell<HashSet<String>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for an endpoint path such as `/dir`.
    pub fn respond(&self, endpoint: &str, response: HttpResponse) {
        self.push(endpoint, Ok(response));
    }

    /// Queue a transport failure for an endpoint path.
    pub fn fail(&self, endpoint: &str, error: FetchError) {
        self.push(endpoint, Err(error));
    }

    fn push(&self, endpoint: &str, outcome: Result<HttpResponse, FetchError>) {
        let mut routes = self.routes.borrow_mut();
        let queue = routes.entry(endpoint.to_string()).or_default();
        if self.served.borrow_mut().remove(endpoint) {
            queue.clear();
        }
        queue.push_back(outcome);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }

    /// Number of requests sent to an endpoint path.
    pub fn count(&self, endpoint: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| endpoint_of(&r.url) == endpoint)
            .count()
    }

    fn answer(&self, request: RecordedRequest) -> Result<HttpResponse, FetchError> {
        let endpoint = endpoint_of(&request.url).to_string();
        self.requests.borrow_mut().push(request);

        let mut routes = self.routes.borrow_mut();
        let Some(queue) = routes.get_mut(&endpoint) else {
            return Ok(HttpResponse::new(404, ""));
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
        } else {
            self.served.borrow_mut().insert(endpoint);
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
        }
    }
}

fn endpoint_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.answer(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        })
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: RequestBody<'_>,
    ) -> Result<HttpResponse, FetchError> {
        let body = match body {
            RequestBody::Text(text) => text.as_bytes().to_vec(),
            RequestBody::Binary(bytes) => bytes.to_vec(),
        };
        self.answer(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        })
    }
}

// =============================================================================
// Frontend
// =============================================================================

/// Records everything the controller shows and answers dialogs from a script.
#[derive(Default)]
pub struct MockFrontend {
    pub notifications: RefCell<Vec<Notification>>,
    pub listings: RefCell<Vec<ListingView>>,
    pub files: RefCell<Vec<(String, String)>>,
    pub prompts: RefCell<VecDeque<Option<String>>>,
    pub confirms: RefCell<VecDeque<bool>>,
    pub reloads: RefCell<usize>,
}

impl MockFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next prompt (`None` cancels).
    pub fn answer_prompt(&self, answer: Option<&str>) {
        self.prompts
            .borrow_mut()
            .push_back(answer.map(str::to_string));
    }

    /// Queue the answer to the next confirmation dialog.
    pub fn answer_confirm(&self, answer: bool) {
        self.confirms.borrow_mut().push_back(answer);
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn last_notification(&self) -> Option<Notification> {
        self.notifications.borrow().last().cloned()
    }

    pub fn has_kind(&self, kind: NotificationKind) -> bool {
        self.notifications.borrow().iter().any(|n| n.kind == kind)
    }

    pub fn last_listing(&self) -> Option<ListingView> {
        self.listings.borrow().last().cloned()
    }

    pub fn last_file(&self) -> Option<(String, String)> {
        self.files.borrow().last().cloned()
    }
}

impl Frontend for MockFrontend {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }

    fn show_listing(&self, view: ListingView) {
        self.listings.borrow_mut().push(view);
    }

    fn show_file(&self, path: &str, content: &str) {
        self.files
            .borrow_mut()
            .push((path.to_string(), content.to_string()));
    }

    fn confirm(&self, _message: &str) -> bool {
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    fn prompt(&self, _message: &str, _default: &str) -> Option<String> {
        self.prompts.borrow_mut().pop_front().flatten()
    }

    fn reload(&self) {
        *self.reloads.borrow_mut() += 1;
    }
}

// =============================================================================
// Timer
// =============================================================================

/// Completes immediately and records every requested delay.
#[derive(Default)]
pub struct InstantSleep {
    pub delays: RefCell<Vec<u32>>,
}

impl InstantSleep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }
}

impl Sleep for InstantSleep {
    async fn sleep(&self, ms: u32) {
        self.delays.borrow_mut().push(ms);
    }
}
