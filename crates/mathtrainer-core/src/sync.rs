//! Remote profile mirror.
//!
//! Local state is the source of truth. After a local update has been
//! applied and persisted, the changed profile fields are patched remotely
//! at most once, on a background worker. Failures are logged and dropped;
//! the remote copy may lag until the next full fetch.

use crate::config::SyncConfig;
use crate::error::{Result, TrainerError};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Partial update of the remote user record; absent fields are untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u64>,
}

impl UserPatch {
    pub fn avatar(id: u32) -> Self {
        Self { avatar_id: Some(id), ..Default::default() }
    }

    pub fn username(name: &str) -> Self {
        Self { username: Some(name.to_string()), ..Default::default() }
    }

    pub fn total_score(score: u64) -> Self {
        Self { total_score: Some(score), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.avatar_id.is_none() && self.username.is_none() && self.total_score.is_none()
    }
}

/// "Patch user fields" remote operation
pub trait RemoteSync: Send + Sync {
    fn patch_user_fields(&self, patch: &UserPatch, credential: &str) -> Result<()>;
}

/// HTTP implementation posting JSON with a bearer credential
pub struct HttpRemoteSync {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpRemoteSync {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TrainerError::Sync(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/api/auth/update", self.endpoint)
    }
}

impl RemoteSync for HttpRemoteSync {
    fn patch_user_fields(&self, patch: &UserPatch, credential: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(credential)
            .json(patch)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TrainerError::Sync("request timed out".to_string())
                } else {
                    TrainerError::Sync(format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(TrainerError::Sync(format!("HTTP {} from profile update", response.status())));
        }
        Ok(())
    }
}

/// Recording fake for tests; optionally fails every call
#[derive(Default)]
pub struct FakeRemoteSync {
    calls: Mutex<Vec<(UserPatch, String)>>,
    fail: bool,
}

impl FakeRemoteSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn calls(&self) -> Vec<(UserPatch, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl RemoteSync for FakeRemoteSync {
    fn patch_user_fields(&self, patch: &UserPatch, credential: &str) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((patch.clone(), credential.to_string()));
        }
        if self.fail {
            return Err(TrainerError::Sync("fake failure".to_string()));
        }
        Ok(())
    }
}

/// Background worker applying patches in submission order
pub struct SyncWorker {
    tx: Option<Sender<UserPatch>>,
    handle: Option<JoinHandle<()>>,
}

impl SyncWorker {
    pub fn spawn(remote: Arc<dyn RemoteSync>, credential: String) -> Self {
        let (tx, rx) = mpsc::channel::<UserPatch>();
        let handle = std::thread::spawn(move || {
            for patch in rx {
                match remote.patch_user_fields(&patch, &credential) {
                    Ok(()) => debug!("remote profile patched: {:?}", patch),
                    Err(e) => warn!("remote profile patch failed, keeping local state: {}", e),
                }
            }
        });
        Self { tx: Some(tx), handle: Some(handle) }
    }

    /// Queue a patch; never blocks
    pub fn submit(&self, patch: UserPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(tx) = &self.tx {
            if tx.send(patch).is_err() {
                warn!("sync worker has stopped, dropping profile patch");
            }
        }
    }

    /// Drain pending patches and stop the worker
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("sync worker panicked");
            }
        }
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_serializes_present_fields_only() {
        let json = serde_json::to_string(&UserPatch::total_score(120)).unwrap();
        assert_eq!(json, r#"{"total_score":120}"#);
        let json = serde_json::to_string(&UserPatch::username("Ada")).unwrap();
        assert_eq!(json, r#"{"username":"Ada"}"#);
    }

    #[test]
    fn test_worker_preserves_order() {
        let fake = Arc::new(FakeRemoteSync::new());
        let worker = SyncWorker::spawn(fake.clone(), "tok".to_string());
        worker.submit(UserPatch::total_score(10));
        worker.submit(UserPatch::avatar(3));
        worker.submit(UserPatch::default());
        worker.shutdown();

        let calls = fake.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, UserPatch::total_score(10));
        assert_eq!(calls[1].0, UserPatch::avatar(3));
        assert_eq!(calls[1].1, "tok");
    }

    #[test]
    fn test_worker_survives_failures() {
        let fake = Arc::new(FakeRemoteSync::failing());
        let worker = SyncWorker::spawn(fake.clone(), "tok".to_string());
        worker.submit(UserPatch::total_score(1));
        worker.submit(UserPatch::total_score(2));
        worker.shutdown();
        assert_eq!(fake.calls().len(), 2);
    }

    #[test]
    fn test_http_url() {
        let config = SyncConfig {
            endpoint: "https://trainer.example/".to_string(),
            ..Default::default()
        };
        let remote = HttpRemoteSync::new(&config).unwrap();
        assert_eq!(remote.url(), "https://trainer.example/api/auth/update");
    }
}
