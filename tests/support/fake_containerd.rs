// ABOUTME: Minimal containerd Containers service served over a unix socket.
// ABOUTME: Records the namespace header of each List call and returns canned containers.

use containerd_client::services::v1::{Container, ListContainersRequest, ListContainersResponse};
use containerd_client::tonic::body::BoxBody;
use containerd_client::tonic::codec::ProstCodec;
use containerd_client::tonic::codegen::{BoxFuture, Context, Poll, Service, http};
use containerd_client::tonic::server::{Grpc, NamedService, UnaryService};
use containerd_client::tonic::transport::Server;
use containerd_client::tonic::{Request, Response, Status};
use std::convert::Infallible;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnixListenerStream;

/// containerd stand-in; the server stops when this is dropped.
pub struct FakeContainerd {
    pub endpoint: String,
    namespaces: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl FakeContainerd {
    pub fn start(dir: &Path, containers: usize) -> Self {
        let path = dir.join("containerd.sock");
        let listener = UnixListener::bind(&path).expect("bind fake containerd socket");
        let namespaces = Arc::new(Mutex::new(Vec::new()));

        let service = ContainersService {
            containers,
            namespaces: Arc::clone(&namespaces),
        };
        let task = tokio::spawn(async move {
            let _ = Server::builder()
                .add_service(service)
                .serve_with_incoming(UnixListenerStream::new(listener))
                .await;
        });

        Self {
            endpoint: format!("unix://{}", path.display()),
            namespaces,
            task,
        }
    }

    /// Namespace header of every List call, in arrival order.
    pub fn namespaces(&self) -> Vec<String> {
        self.namespaces.lock().unwrap().clone()
    }
}

impl Drop for FakeContainerd {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Clone)]
struct ContainersService {
    containers: usize,
    namespaces: Arc<Mutex<Vec<String>>>,
}

impl NamedService for ContainersService {
    const NAME: &'static str = "containerd.services.containers.v1.Containers";
}

impl Service<http::Request<BoxBody>> for ContainersService {
    type Response = http::Response<BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    // Only List is ever called; every method is answered by it.
    fn call(&mut self, req: http::Request<BoxBody>) -> Self::Future {
        let handler = ListHandler(self.clone());
        Box::pin(async move {
            let mut grpc = Grpc::new(ProstCodec::default());
            Ok(grpc.unary(handler, req).await)
        })
    }
}

struct ListHandler(ContainersService);

impl UnaryService<ListContainersRequest> for ListHandler {
    type Response = ListContainersResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(&mut self, request: Request<ListContainersRequest>) -> Self::Future {
        let namespace = request
            .metadata()
            .get("containerd-namespace")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let service = self.0.clone();

        Box::pin(async move {
            let Some(namespace) = namespace else {
                return Err(Status::failed_precondition("namespace is required"));
            };
            service.namespaces.lock().unwrap().push(namespace);

            let containers = (0..service.containers)
                .map(|i| Container {
                    id: format!("c{i}"),
                    ..Default::default()
                })
                .collect();
            Ok(Response::new(ListContainersResponse { containers }))
        })
    }
}
