// ABOUTME: Shared helpers for detection integration tests.
// ABOUTME: Provides listening unix sockets, a scripted lister and fake runtime APIs.

#![allow(dead_code)]

pub mod fake_containerd;
pub mod fake_docker;

use async_trait::async_trait;
use rtprobe::endpoint::ResolvedEndpoint;
use rtprobe::runtime::{ContainerLister, ListError, RuntimeKind};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::UnixListener;

/// A bound unix socket; connections queue in the backlog without being accepted.
pub struct LiveSocket {
    pub endpoint: String,
    _listener: UnixListener,
}

pub fn live_socket(dir: &Path, name: &str) -> LiveSocket {
    let path = dir.join(name);
    let listener = UnixListener::bind(&path).expect("bind test socket");
    LiveSocket {
        endpoint: format!("unix://{}", path.display()),
        _listener: listener,
    }
}

/// Endpoint for a socket path nothing listens on.
pub fn dead_endpoint(dir: &Path, name: &str) -> String {
    format!("unix://{}", dir.join(name).display())
}

#[derive(Clone, Copy)]
pub enum Reply {
    Count(usize),
    Fail,
    Hang,
}

/// Lister answering per socket address, recording every call.
#[derive(Default)]
pub struct ScriptedLister {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLister {
    pub fn reply(mut self, endpoint: &str, reply: Reply) -> Self {
        let address = endpoint.trim_start_matches("unix://").to_string();
        self.replies.insert(address, reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContainerLister for ScriptedLister {
    async fn count_containers(
        &self,
        endpoint: &ResolvedEndpoint,
        _timeout: Duration,
    ) -> Result<usize, ListError> {
        self.calls
            .lock()
            .unwrap()
            .push(endpoint.address().to_string());

        match self.replies.get(endpoint.address()).copied() {
            Some(Reply::Count(n)) => Ok(n),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(1)
            }
            Some(Reply::Fail) | None => Err(ListError::Query {
                runtime: RuntimeKind::Docker,
                message: "scripted failure".to_string(),
            }),
        }
    }
}
