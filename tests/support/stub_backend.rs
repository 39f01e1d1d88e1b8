//! In-process axum backend serving one canned reply.
//!
//! Every request receives the same status and body; request targets
//! (path + query) are recorded in arrival order.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::Router;
use axum::extract::{OriginalUri, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Arc<str>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct StubBackend {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn serve(status: u16, body: impl Into<String>) -> Self {
        // Bound before spawning so the port accepts connections on return.
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub backend");
        listener.set_nonblocking(true).expect("non-blocking stub listener");
        let port = listener.local_addr().expect("stub backend address").port();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: Arc::from(body.into()),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(reply).with_state(state);

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub backend runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio stub listener");
                axum::serve(listener, app).await.expect("serve stub backend");
            });
        });

        Self { port, requests }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::serve(200, body)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn reply(State(state): State<StubState>, OriginalUri(uri): OriginalUri) -> Response {
    let target = uri
        .path_and_query()
        .map(|target| target.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.requests.lock().unwrap().push(target);

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.to_string(),
    )
        .into_response()
}

/// A localhost port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind unused port");
    listener.local_addr().expect("unused port address").port()
}
