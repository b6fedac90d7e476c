//! Mock services for testing
//!
//! In-memory stand-ins for the provider API transport and the git pusher, so
//! the mirroring flow runs without network access or a git binary.

use async_trait::async_trait;
use repomirror::domain::entities::repository::Repository;
use repomirror::domain::value_objects::remote_url::RemoteUrl;
use repomirror::infrastructure::forge::{ApiRequest, ApiResponse, ApiTransport, ForgeError};
use repomirror::infrastructure::git::{MirrorPusher, PushOutcome};
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Mock API transport replaying scripted responses per `(method, url)`
///
/// Responses for a route are consumed in order and the last one repeats.
/// Unscripted requests get HTTP 501 so they surface as failures.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<ApiResponse>>>,
    unreachable: Mutex<HashSet<(Method, String)>>,
    call_history: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scripted response
    pub fn respond(self, method: Method, url: &str, status: u16, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(ApiResponse::new(status, body));
        self
    }

    /// Fail every request to this route before a response arrives
    pub fn unreachable(self, method: Method, url: &str) -> Self {
        self.unreachable
            .lock()
            .unwrap()
            .insert((method, url.to_string()));
        self
    }

    /// `METHOD url` for every request, in order
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .map(ApiRequest::describe)
            .collect()
    }

    /// JSON bodies of requests sent to `url`
    pub fn bodies_for(&self, url: &str) -> Vec<Value> {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .filter_map(|r| r.body.clone())
            .collect()
    }

    pub fn count(&self, method: Method) -> usize {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    pub fn is_untouched(&self) -> bool {
        self.call_history.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ForgeError> {
        let key = (request.method.clone(), request.url.clone());
        let description = request.describe();
        self.call_history.lock().unwrap().push(request);

        if self.unreachable.lock().unwrap().contains(&key) {
            return Err(ForgeError::transport(description, connection_error()));
        }

        let mut routes = self.routes.lock().unwrap();
        let response = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(response.unwrap_or_else(|| ApiResponse::new(501, json!("unscripted request"))))
    }
}

/// A real `reqwest::Error` without touching the network
fn connection_error() -> reqwest::Error {
    match reqwest::Client::new().get("not a url").build() {
        Err(e) => e,
        Ok(_) => unreachable!("relative URL must not build"),
    }
}

/// Mock pusher recording every push and failing for selected repositories
#[derive(Default)]
pub struct MockPusher {
    pushes: Mutex<Vec<(String, String)>>,
    failing_repos: HashSet<String>,
    unlaunchable_repos: HashSet<String>,
}

impl MockPusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make pushes of `repo_name` exit nonzero
    pub fn failing_for(mut self, repo_name: &str) -> Self {
        self.failing_repos.insert(repo_name.to_string());
        self
    }

    /// Make pushes of `repo_name` fail before git starts
    pub fn launch_failing_for(mut self, repo_name: &str) -> Self {
        self.unlaunchable_repos.insert(repo_name.to_string());
        self
    }

    /// `(repository name, remote url)` of every push attempt
    pub fn get_pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.get_pushes().into_iter().map(|(_, url)| url).collect()
    }

    pub fn attempts_for(&self, repo_name: &str) -> usize {
        self.pushes
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == repo_name)
            .count()
    }
}

#[async_trait]
impl MirrorPusher for MockPusher {
    async fn push(&self, repository: &Repository, remote: &RemoteUrl) -> PushOutcome {
        self.pushes
            .lock()
            .unwrap()
            .push((repository.name.clone(), remote.to_string()));

        if self.unlaunchable_repos.contains(&repository.name) {
            PushOutcome::LaunchFailed {
                message: "failed to launch git: No such file or directory".to_string(),
            }
        } else if self.failing_repos.contains(&repository.name) {
            PushOutcome::Rejected {
                exit_code: Some(128),
                stderr: "fatal: Could not read from remote repository.".to_string(),
            }
        } else {
            PushOutcome::Pushed {
                stderr: String::new(),
            }
        }
    }
}
