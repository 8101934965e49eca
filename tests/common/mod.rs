use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Client;
use serde_json::{Value, json};

use shipform::config::Config;

/// A running test server instance on an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub fn font_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

/// Render-dependent tests skip when no font files are installed.
pub fn fonts_available() -> bool {
    shipform::report::fonts::any_available(&font_dir())
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        max_body_size: 10 * 1024 * 1024,
        font_dir: font_dir(),
        log_level: "warn".to_string(),
        smtp: None,
    }
}

/// A complete, valid submission body for the API.
pub fn sample_report_json() -> Value {
    json!({
        "vessel": "117정",
        "department": "기관",
        "rank": "경사",
        "name": "홍길동",
        "phone": "010-1234-5678",
        "equipment": "발전기",
        "model": "ABC-100",
        "action_req": "부품 교체",
        "condition": "작동 불가",
        "status": "누유 발생\n소음 심함",
    })
}

/// Spawn the app with dispatch disabled (no SMTP config).
pub async fn spawn_app() -> TestApp {
    let app = shipform::build_app(test_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}
