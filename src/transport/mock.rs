//! Mock HTTP client shared by the router and Telegram tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// HTTP client that replays a queue of canned results and records requests.
///
/// Once the queue is exhausted every request fails with
/// [`HttpError::Timeout`].
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    /// Creates a mock returning `responses` in order.
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock returning `200 OK` with each JSON body in order.
    pub fn with_json(bodies: Vec<serde_json::Value>) -> Self {
        Self::new(
            bodies
                .into_iter()
                .map(|b| Ok(HttpResponse::ok(b.to_string())))
                .collect(),
        )
    }

    /// Returns every request received so far.
    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of requests received so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HttpError::Timeout))
    }
}
