//! Local stand-in for the RapidAPI endpoint used by tests.

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

pub(crate) struct MockUpstream {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

/// Serves `POST /texttoimage` on an ephemeral port, answering every call with
/// `status` and the raw `body`. Must be called from inside an actix system.
pub(crate) fn spawn_upstream(status: u16, body: &str) -> std::io::Result<MockUpstream> {
    let status = StatusCode::from_u16(status)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let body = body.to_string();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let server = HttpServer::new(move || {
        let recorded = recorded.clone();
        let body = body.clone();
        App::new().route(
            "/texttoimage",
            web::post().to(move |req: HttpRequest, payload: web::Bytes| {
                let recorded = recorded.clone();
                let body = body.clone();
                async move {
                    let header = |name: &str| {
                        req.headers()
                            .get(name)
                            .and_then(|value| value.to_str().ok())
                            .map(String::from)
                    };
                    let request = RecordedRequest {
                        api_key: header("x-rapidapi-key"),
                        host: header("x-rapidapi-host"),
                        content_type: header("content-type"),
                        body: serde_json::from_slice(&payload).unwrap_or(Value::Null),
                    };
                    if let Ok(mut requests) = recorded.lock() {
                        requests.push(request);
                    }

                    HttpResponse::build(status)
                        .content_type("application/json")
                        .body(body)
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;

    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "no bound address"))?;
    actix_web::rt::spawn(server.run());

    Ok(MockUpstream {
        endpoint: format!("http://{}/texttoimage", addr),
        requests,
    })
}
