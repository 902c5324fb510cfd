// ABOUTME: Minimal Docker Engine API served over a unix socket.
// ABOUTME: Answers version and container listing requests with canned JSON.

use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

#[derive(Clone, Copy)]
pub enum DockerBehavior {
    /// Report this many containers.
    Containers(usize),
    /// Version reply carries no API version.
    NoApiVersion,
    /// Container listing answers 500.
    ListFails,
}

/// Docker API stand-in; the accept loop stops when this is dropped.
pub struct FakeDocker {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl FakeDocker {
    pub fn start(dir: &Path, behavior: DockerBehavior) -> Self {
        let path = dir.join("docker.sock");
        let listener = UnixListener::bind(&path).expect("bind fake docker socket");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve_connection(stream, behavior, Arc::clone(&log)));
            }
        });

        Self {
            endpoint: format!("unix://{}", path.display()),
            requests,
            task,
        }
    }

    /// Request targets in arrival order, query string included.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeDocker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve_connection(
    stream: UnixStream,
    behavior: DockerBehavior,
    log: Arc<Mutex<Vec<String>>>,
) {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);

    // Keep-alive: serve requests until the client hangs up.
    loop {
        let mut request_line = String::new();
        match reader.read_line(&mut request_line).await {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let mut content_length = 0;
        loop {
            let mut header = String::new();
            match reader.read_line(&mut header).await {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }
        if content_length > 0 {
            let mut body = vec![0; content_length];
            if reader.read_exact(&mut body).await.is_err() {
                return;
            }
        }

        let target = request_line
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let (status, body) = respond(&target, behavior);
        log.lock().unwrap().push(target);

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        if write.write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}

fn respond(target: &str, behavior: DockerBehavior) -> (&'static str, String) {
    let path = target.split('?').next().unwrap_or_default();

    if path.ends_with("/version") {
        let body = match behavior {
            DockerBehavior::NoApiVersion => r#"{"Version":"24.0.7"}"#,
            _ => r#"{"Version":"24.0.7","ApiVersion":"1.43","MinAPIVersion":"1.12"}"#,
        };
        return ("200 OK", body.to_string());
    }

    if path.ends_with("/containers/json") {
        return match behavior {
            DockerBehavior::Containers(count) => {
                let containers: Vec<String> = (0..count)
                    .map(|i| format!(r#"{{"Id":"c{i}","Names":["/c{i}"],"State":"running"}}"#))
                    .collect();
                ("200 OK", format!("[{}]", containers.join(",")))
            }
            _ => (
                "500 Internal Server Error",
                r#"{"message":"listing failed"}"#.to_string(),
            ),
        };
    }

    ("404 Not Found", r#"{"message":"page not found"}"#.to_string())
}
