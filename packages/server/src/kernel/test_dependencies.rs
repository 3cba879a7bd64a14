// Test doubles for kernel traits
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{BasePageFetcher, FetchError, FetchedPage};

// =============================================================================
// Mock Page Fetcher
// =============================================================================

/// Canned outcome for one fetch call
#[derive(Debug, Clone)]
pub enum MockFetch {
    Page(FetchedPage),
    Unreachable,
    Status(u16),
}

/// Fetcher that replays queued outcomes in order and records requested URLs.
///
/// When the queue is empty every call fails as unreachable.
#[derive(Clone, Default)]
pub struct MockPageFetcher {
    responses: Arc<Mutex<VecDeque<MockFetch>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_page(self, status_code: u16, body: &str) -> Self {
        self.push(MockFetch::Page(FetchedPage {
            status_code,
            body: body.to_string(),
        }));
        self
    }

    /// Queue a network-level failure
    pub fn with_unreachable(self) -> Self {
        self.push(MockFetch::Unreachable);
        self
    }

    /// Queue a non-2xx failure
    pub fn with_status_error(self, status_code: u16) -> Self {
        self.push(MockFetch::Status(status_code));
        self
    }

    pub fn push(&self, outcome: MockFetch) {
        self.responses.lock().unwrap().push_back(outcome);
    }

    /// URLs passed to `fetch`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockFetch::Page(page)) => Ok(page),
            Some(MockFetch::Status(status_code)) => Err(FetchError::Status {
                url: url.to_string(),
                status_code,
            }),
            Some(MockFetch::Unreachable) | None => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }
}
