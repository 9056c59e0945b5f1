use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormFields {
    check_in: String,
    check_out: String,
    saved_topics: String,
    topics_input: String,
}

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    key: String,
    form: FormFields,
}

#[derive(Debug, Deserialize)]
struct HistoryItem {
    key: String,
    status: String,
    preview: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum History {
    Empty { message: String },
    Items { items: Vec<HistoryItem> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    check_in: Option<String>,
    check_out: Option<String>,
    topics: Option<String>,
    updated_at: i64,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    key: String,
    entry: Entry,
    status: String,
    history: History,
}

struct TestServer {
    base_url: String,
    data_path: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.data_path);
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
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

fn unique_data_path(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("daylog_http_{tag}_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
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

async fn spawn_server(tag: &str, seed: Option<serde_json::Value>) -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path(tag);
    if let Some(seed) = seed {
        std::fs::write(&data_path, seed.to_string()).expect("write seed data");
    }

    let child = Command::new(env!("CARGO_BIN_EXE_daylog"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", &data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_path,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server("shared", None).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_action(client: &Client, base_url: &str, body: serde_json::Value) -> ActionResponse {
    let response = client
        .post(format!("{base_url}/api/action"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn get_today(client: &Client, base_url: &str) -> TodayResponse {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_check_in_then_out_completes_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let checked_in = post_action(
        &client,
        &server.base_url,
        serde_json::json!({ "action": "check_in" }),
    )
    .await;
    assert!(checked_in.entry.check_in.is_some());
    assert_eq!(checked_in.status, "active");

    let checked_out = post_action(
        &client,
        &server.base_url,
        serde_json::json!({ "action": "check_out" }),
    )
    .await;
    assert_eq!(checked_out.key, checked_in.key);
    assert_eq!(checked_out.entry.check_in, checked_in.entry.check_in);
    assert!(checked_out.entry.check_out.is_some());
    assert!(checked_out.entry.updated_at >= checked_in.entry.updated_at);
    assert_eq!(checked_out.status, "completed");

    let today = get_today(&client, &server.base_url).await;
    assert_eq!(today.key, checked_out.key);
    assert_eq!(Some(today.form.check_in), checked_out.entry.check_in);
    assert_eq!(Some(today.form.check_out), checked_out.entry.check_out);
    assert!(!today.date.is_empty());
}

#[tokio::test]
async fn http_topics_show_in_history() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let saved = post_action(
        &client,
        &server.base_url,
        serde_json::json!({ "action": "topics", "topics": "  ownership and borrowing  " }),
    )
    .await;
    assert_eq!(saved.entry.topics.as_deref(), Some("ownership and borrowing"));

    let History::Items { items } = saved.history else {
        panic!("history should not be empty after a save");
    };
    assert_eq!(items[0].key, saved.key);
    assert_eq!(items[0].preview.as_deref(), Some("ownership and borrowing"));
    assert!(["not_started", "active", "completed"].contains(&items[0].status.as_str()));

    let form: FormFields = client
        .get(format!("{}/api/entries/{}", server.base_url, saved.key))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(form.saved_topics, "ownership and borrowing");
    assert_eq!(form.topics_input, "ownership and borrowing");
}

#[tokio::test]
async fn http_form_posts_redirect_and_update_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    for path in ["/check-in", "/check-out"] {
        let response = client
            .post(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.headers()["location"], "/");
    }

    let response = client
        .post(format!("{}/topics", server.base_url))
        .form(&[("topics", "  form <b>topics</b>  ")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let today = get_today(&client, &server.base_url).await;
    assert_ne!(today.form.check_in, "--");
    assert_ne!(today.form.check_out, "--");
    assert_eq!(today.form.saved_topics, "form <b>topics</b>");
    assert_eq!(today.form.topics_input, "form <b>topics</b>");

    let page = client
        .get(format!("{}/?key={}", server.base_url, today.key))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    let html = page.text().await.unwrap();
    assert!(html.contains("Back to today"));
    assert!(html.contains(&format!("Showing saved entry for {}", today.key)));
    assert!(html.contains(&today.form.check_in));
    assert!(html.contains(&today.form.check_out));
    assert!(html.contains("form &lt;b&gt;topics&lt;/b&gt;"));
    assert!(html.contains("badge--checkout"));

    let page = client
        .get(format!("{}/?key=1999-01-01", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<span id="checkInTime" class="value">--</span>"#));
    assert!(page.contains(r#"<textarea id="topicsInput" name="topics"></textarea>"#));

    let page = client
        .get(format!("{}/?key=+2024-1-05", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!page.contains("Back to today"));
}

#[tokio::test]
async fn http_rejects_bad_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/action", server.base_url))
        .json(&serde_json::json!({ "action": "delete" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    for key in ["yesterday", "+2024-1-05"] {
        let response = client
            .get(format!("{}/api/entries/{key}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "{key}");
    }

    let form: FormFields = client
        .get(format!("{}/api/entries/1999-01-01", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(form.check_in, "--");
    assert_eq!(form.check_out, "--");
    assert_eq!(form.saved_topics, "--");
    assert_eq!(form.topics_input, "");
}

#[tokio::test]
async fn http_legacy_slots_seed_empty_store() {
    let server = spawn_server(
        "legacy",
        Some(serde_json::json!({
            "checkInTime": "08:00:00",
            "topicsCovered": "legacy notes",
        })),
    )
    .await;
    let client = Client::new();

    let today = get_today(&client, &server.base_url).await;
    assert_eq!(today.form.check_in, "08:00:00");
    assert_eq!(today.form.check_out, "--");
    assert_eq!(today.form.topics_input, "legacy notes");

    let history: History = client
        .get(format!("{}/api/history", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    match history {
        History::Empty { message } => assert!(message.starts_with("No past entries")),
        History::Items { items } => panic!("expected empty history, got {items:?}"),
    }
}

#[tokio::test]
async fn http_persists_document_on_disk() {
    let server = spawn_server("persist", None).await;
    let client = Client::new();

    let saved = post_action(
        &client,
        &server.base_url,
        serde_json::json!({ "action": "topics", "topics": "serde" }),
    )
    .await;

    let raw = std::fs::read_to_string(&server.data_path).unwrap();
    let slots: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(slots.get("topicsCovered").map(String::as_str), Some("serde"));

    let entries: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&slots["entries"]).unwrap();
    assert_eq!(entries[&saved.key]["topics"], "serde");
    assert!(entries[&saved.key]["updatedAt"].as_i64().unwrap() > 0);
}
