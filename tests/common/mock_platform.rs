//! Mock review service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use stackup::error::{Error, Result};
use stackup::platform::PlatformService;
use stackup::types::{Platform, PlatformConfig, PullRequest};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Simple mock review service
///
/// Manually implements `PlatformService` rather than using a mocking
/// crate, matching how the git side is mocked.
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Created PRs become visible to `find_pr_by_head`, so idempotence
///   tests work without extra setup
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    authenticated: bool,
    next_pr_number: AtomicU64,
    open_prs: Mutex<HashMap<String, PullRequest>>,
    // Call tracking
    find_pr_calls: Mutex<Vec<String>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_find_pr: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new authenticated mock with a GitHub test config
    pub fn new() -> Self {
        Self::with_config(PlatformConfig {
            platform: Platform::GitHub,
            owner: "testowner".to_string(),
            repo: "testrepo".to_string(),
            host: None,
        })
    }

    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            authenticated: true,
            next_pr_number: AtomicU64::new(1),
            open_prs: Mutex::new(HashMap::new()),
            find_pr_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_find_pr: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
        }
    }

    /// Make `is_authenticated` report false
    #[must_use]
    pub const fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Seed an existing open PR for a head branch
    pub fn with_open_pr(self, head: &str, base: &str) -> Self {
        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        self.open_prs.lock().unwrap().insert(
            head.to_string(),
            PullRequest {
                number,
                html_url: format!("https://github.com/test/repo/pull/{number}"),
                base_ref: base.to_string(),
                head_ref: head.to_string(),
                title: format!("PR for {head}"),
            },
        );
        self
    }

    /// Make `find_pr_by_head` return an error
    pub fn fail_find_pr(&self, msg: &str) {
        *self.error_on_find_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Get all branches that `find_pr_by_head` was called with
    pub fn get_find_pr_calls(&self) -> Vec<String> {
        self.find_pr_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `create_pr` was never called for a head branch
    pub fn assert_create_pr_not_called(&self, head: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().all(|c| c.head != head),
            "Expected no create_pr for {head} but got: {calls:?}"
        );
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn find_pr_by_head(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        self.find_pr_calls
            .lock()
            .unwrap()
            .push(head_branch.to_string());

        if let Some(msg) = self.error_on_find_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.open_prs.lock().unwrap().get(head_branch).cloned())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        };
        self.open_prs
            .lock()
            .unwrap()
            .insert(head.to_string(), pr.clone());
        Ok(pr)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
