//! HTTP boundary: one blocking GET at a time, body text or nothing.
//!
//! Failures are logged and reported as `None`; callers treat that as
//! missing data rather than an error.

use crate::config::Config;
use crate::error::Result;
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use std::sync::Arc;

/// A single page retrieval
pub trait Fetch {
    /// GET `url` and return the response body, `None` on any failure
    fn get(&self, url: &str) -> Option<String>;
}

/// Page retrieval plus short-lived cookie sessions
pub trait Fetcher: Fetch {
    /// Open a session whose requests share one cookie jar.
    /// The jar is released when the returned value is dropped.
    fn session(&self) -> Box<dyn Fetch + '_>;
}

/// Production fetcher backed by blocking reqwest
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Option<String> {
        fetch_text(&self.client, url)
    }
}

impl Fetcher for HttpFetcher {
    fn session(&self) -> Box<dyn Fetch + '_> {
        Box::new(CookieSession::open(&self.user_agent))
    }
}

/// Requests sharing one cookie jar, owned by the session's client
struct CookieSession {
    /// `None` when the client could not be built; every fetch then misses
    client: Option<Client>,
}

impl CookieSession {
    fn open(user_agent: &str) -> Self {
        let client = match Client::builder()
            .user_agent(user_agent)
            .cookie_provider(Arc::new(Jar::default()))
            .build()
        {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("Failed to open cookie session: {}", e);
                None
            }
        };
        log::debug!("Opened cookie session");
        Self { client }
    }
}

impl Fetch for CookieSession {
    fn get(&self, url: &str) -> Option<String> {
        fetch_text(self.client.as_ref()?, url)
    }
}

impl Drop for CookieSession {
    fn drop(&mut self) {
        log::debug!("Releasing cookie session");
    }
}

fn fetch_text(client: &Client, url: &str) -> Option<String> {
    log::debug!("GET {}", url);

    let response = match client.get(url).send() {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Request to {} failed: {}", url, e);
            return None;
        }
    };

    if !response.status().is_success() {
        log::warn!("Request to {} returned HTTP {}", url, response.status());
        return None;
    }

    match response.text() {
        Ok(body) => Some(body),
        Err(e) => {
            log::warn!("Failed to read body of {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fetcher for scraper and pipeline tests

    use super::{Fetch, Fetcher};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// Serves canned pages by exact URL and records every request
    #[derive(Default)]
    pub struct FakeFetcher {
        pages: HashMap<String, String>,
        pub requests: RefCell<Vec<String>>,
        pub sessions_opened: Cell<usize>,
        pub sessions_closed: Cell<usize>,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl Fetch for FakeFetcher {
        fn get(&self, url: &str) -> Option<String> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned()
        }
    }

    impl Fetcher for FakeFetcher {
        fn session(&self) -> Box<dyn Fetch + '_> {
            self.sessions_opened.set(self.sessions_opened.get() + 1);
            Box::new(FakeSession { fetcher: self })
        }
    }

    struct FakeSession<'a> {
        fetcher: &'a FakeFetcher,
    }

    impl Fetch for FakeSession<'_> {
        fn get(&self, url: &str) -> Option<String> {
            self.fetcher.get(url)
        }
    }

    impl Drop for FakeSession<'_> {
        fn drop(&mut self) {
            let closed = &self.fetcher.sessions_closed;
            closed.set(closed.get() + 1);
        }
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
