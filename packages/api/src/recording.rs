use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    url_suffix: String,
    replies: VecDeque<Result<ApiResponse, ApiError>>,
    fallback: Result<ApiResponse, ApiError>,
}

#[derive(Debug, Default)]
struct Inner {
    routes: Vec<Route>,
    requests: Vec<ApiRequest>,
}

/// In-memory HttpTransport for tests.
///
/// Routes match on method and URL suffix. Each route replays its queued
/// replies in order and then keeps returning the last one. Requests that match
/// no route get a 404. Every request is recorded, matched or not.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with the given status and body for `method url_suffix`.
    pub fn respond(&self, method: Method, url_suffix: &str, status: u16, body: &str) -> &Self {
        self.push(method, url_suffix, Ok(ApiResponse::new(status, body)))
    }

    /// Queue a transport failure for `method url_suffix`.
    pub fn fail(&self, method: Method, url_suffix: &str, message: &str) -> &Self {
        self.push(method, url_suffix, Err(ApiError::Network(message.to_string())))
    }

    fn push(
        &self,
        method: Method,
        url_suffix: &str,
        reply: Result<ApiResponse, ApiError>,
    ) -> &Self {
        let mut inner = self.lock();
        let existing = inner
            .routes
            .iter()
            .position(|r| r.method == method && r.url_suffix == url_suffix);
        match existing {
            Some(index) => {
                let route = &mut inner.routes[index];
                route.replies.push_back(reply.clone());
                route.fallback = reply;
            }
            None => inner.routes.push(Route {
                method,
                url_suffix: url_suffix.to_string(),
                replies: VecDeque::from([reply.clone()]),
                fallback: reply,
            }),
        }
        drop(inner);
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests sent to `method url_suffix`.
    pub fn count(&self, method: Method, url_suffix: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.url.ends_with(url_suffix))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HttpTransport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut inner = self.lock();
        inner.requests.push(request.clone());

        // Longest suffix wins so `/documents/d-1/versions` beats `/documents`.
        let route = inner
            .routes
            .iter_mut()
            .filter(|r| r.method == request.method && request.url.ends_with(&r.url_suffix))
            .max_by_key(|r| r.url_suffix.len());

        match route {
            Some(route) => route
                .replies
                .pop_front()
                .unwrap_or_else(|| route.fallback.clone()),
            None => Ok(ApiResponse::new(404, "not found")),
        }
    }
}
