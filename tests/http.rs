use axum::{routing::get, Json, Router};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
    service_available: bool,
    scope: String,
}

#[derive(Debug, Deserialize)]
struct ResetResponse {
    reset: bool,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct DisplaySnapshot {
    counter: String,
    visits: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct SystemInfo {
    total_visitors: u64,
    storage_key: String,
    commands: Vec<String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[cfg(unix)]
mod cleanup {
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for &pid in pids.iter() {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("mission_control_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/count")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(envs: &[(&str, String)]) -> TestServer {
    let port = pick_free_port();
    let mut command = Command::new(env!("CARGO_BIN_EXE_mission_control"));
    command
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_data_path())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    for (name, value) in envs {
        command.env(name, value);
    }
    let child = command.spawn().expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn spawn_fake_counter(value: u64) -> String {
    let app = Router::new().route(
        "/hit/test/visits",
        get(move || async move { Json(serde_json::json!({ "value": value })) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn load_page(client: &Client, server: &TestServer) -> String {
    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    response.text().await.unwrap()
}

async fn count(client: &Client, server: &TestServer) -> CountResponse {
    client
        .get(format!("{}/api/count", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn reset(client: &Client, server: &TestServer, confirmed: bool) -> reqwest::Response {
    client
        .post(format!("{}/api/reset", server.base_url))
        .json(&serde_json::json!({ "confirmed": confirmed }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_local_page_loads_count_up_and_reset() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&[("COUNTER_MODE", "local".to_string())]).await;
    let client = Client::new();

    let first = load_page(&client, &server).await;
    assert!(first.contains(r#"<span id="counter">1</span>"#));
    let second = load_page(&client, &server).await;
    assert!(second.contains(r#"<span id="counter">2</span>"#));

    let status = count(&client, &server).await;
    assert_eq!(status.count, 2);
    assert!(!status.service_available);
    assert_eq!(status.scope, "local");

    let declined: ResetResponse = reset(&client, &server, false).await.json().await.unwrap();
    assert!(!declined.reset);
    assert_eq!(declined.count, 2);

    let accepted: ResetResponse = reset(&client, &server, true).await.json().await.unwrap();
    assert!(accepted.reset);
    assert_eq!(accepted.count, 0);

    let display: DisplaySnapshot = client
        .get(format!("{}/api/display", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(display.counter, "0");
    assert_eq!(display.visits, "0");

    let third = load_page(&client, &server).await;
    assert!(third.contains(r#"<span id="counter">1</span>"#));
}

#[tokio::test]
async fn http_unreachable_remote_falls_back_and_permits_reset() {
    let _guard = TEST_LOCK.lock().await;
    let dead_remote = format!("http://127.0.0.1:{}", pick_free_port());
    let server = spawn_server(&[
        ("COUNTER_MODE", "networked".to_string()),
        ("COUNTER_API_BASE", dead_remote),
        ("COUNTER_API_TIMEOUT_MS", "500".to_string()),
    ])
    .await;
    let client = Client::new();

    let page = load_page(&client, &server).await;
    assert!(page.contains(r#"<span id="counter">1</span>"#));

    let status = count(&client, &server).await;
    assert_eq!(status.count, 1);
    assert!(!status.service_available);

    let response = reset(&client, &server, true).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: ResetResponse = response.json().await.unwrap();
    assert!(body.reset);
}

#[tokio::test]
async fn http_remote_count_is_adopted_and_reset_refused() {
    let _guard = TEST_LOCK.lock().await;
    let remote = spawn_fake_counter(42).await;
    let server = spawn_server(&[
        ("COUNTER_MODE", "networked".to_string()),
        ("COUNTER_API_BASE", remote),
        ("COUNTER_NAMESPACE", "test".to_string()),
    ])
    .await;
    let client = Client::new();

    let page = load_page(&client, &server).await;
    assert!(page.contains(r#"<span id="counter">42</span>"#));
    assert!(page.contains("GLOBAL"));

    let status = count(&client, &server).await;
    assert_eq!(status.count, 42);
    assert!(status.service_available);
    assert_eq!(status.scope, "global");

    let response = reset(&client, &server, true).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.text().await.unwrap().contains("Cannot reset global counter"));
    assert_eq!(count(&client, &server).await.count, 42);
}

#[tokio::test]
async fn http_info_and_clock() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&[
        ("COUNTER_MODE", "local".to_string()),
        ("COUNTER_STORAGE_KEY", "testVisitorCount".to_string()),
    ])
    .await;
    let client = Client::new();
    load_page(&client, &server).await;

    let info: SystemInfo = client
        .get(format!("{}/api/info", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info.total_visitors, 1);
    assert_eq!(info.storage_key, "testVisitorCount");
    assert!(!info.commands.is_empty());

    let display: DisplaySnapshot = client
        .get(format!("{}/api/display", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let bytes = display.time.as_bytes();
    assert_eq!(bytes.len(), 8);
    assert_eq!(bytes[2], b':');
    assert_eq!(bytes[5], b':');
}
