use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::{Json, Router};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct ListenerState {
    hits: Arc<Mutex<Vec<Hit>>>,
    status: StatusCode,
}

/// Stand-in for the automation host that receives camera notifications.
pub struct MockListener {
    pub base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl MockListener {
    pub async fn spawn() -> Self {
        Self::spawn_with_status(StatusCode::OK).await
    }

    pub async fn spawn_with_status(status: StatusCode) -> Self {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = ListenerState {
            hits: hits.clone(),
            status,
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock listener");
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().expect("hits lock").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.hits().into_iter().map(|h| h.path).collect();
        paths.sort();
        paths
    }

    /// Deliveries are detached tasks, so poll until `count` arrive.
    pub async fn wait_for_hits(&self, count: usize) -> Vec<Hit> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            let hits = self.hits();
            if hits.len() >= count || tokio::time::Instant::now() >= deadline {
                return hits;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn record(
    State(state): State<ListenerState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> StatusCode {
    state.hits.lock().expect("hits lock").push(Hit {
        path: uri.path().to_string(),
        body,
    });
    state.status
}
