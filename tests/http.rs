use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Habit {
    id: String,
    name: String,
    icon: String,
    frequency: String,
    growth_stage: u8,
    completed_today: bool,
    last_completed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HabitResponse {
    habit: Option<Habit>,
    cues: Vec<String>,
    notice: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GardenResponse {
    habits: Vec<Habit>,
    completion_rate: f64,
    bloomed_count: usize,
    completed_today: usize,
    total: usize,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    removed: bool,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "habit_garden_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/garden")).send().await {
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

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_garden"))
        .env("PORT", port.to_string())
        .env("HABITS_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn plant(client: &Client, base_url: &str, name: &str) -> Habit {
    let response: HabitResponse = client
        .post(format!("{base_url}/api/habits"))
        .json(&serde_json::json!({ "name": name, "frequency": "daily" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(response.notice.is_some());
    response.habit.expect("created habit")
}

#[tokio::test]
async fn http_create_seeds_a_habit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = plant(&client, &server.base_url, "Morning Meditation").await;
    assert_eq!(habit.name, "Morning Meditation");
    assert_eq!(habit.icon, "\u{1F9D8}");
    assert_eq!(habit.frequency, "daily");
    assert_eq!(habit.growth_stage, 0);
    assert!(!habit.completed_today);
    assert!(habit.last_completed.is_none());

    let cleanup = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert!(cleanup.status().is_success());
}

#[tokio::test]
async fn http_create_rejects_blank_name() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_complete_is_idempotent_within_a_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = plant(&client, &server.base_url, "Drink water").await;

    let first: HabitResponse = client
        .post(format!(
            "{}/api/habits/{}/complete",
            server.base_url, habit.id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let watered = first.habit.expect("watered habit");
    assert_eq!(watered.growth_stage, 10);
    assert!(watered.completed_today);
    assert!(watered.last_completed.is_some());
    assert_eq!(first.cues, ["water"]);

    // Second watering the same day changes nothing and plays nothing.
    let second: HabitResponse = client
        .post(format!(
            "{}/api/habits/{}/complete",
            server.base_url, habit.id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let unchanged = second.habit.expect("habit still present");
    assert_eq!(unchanged.growth_stage, 10);
    assert!(unchanged.completed_today);
    assert!(second.cues.is_empty());

    let cleanup = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert!(cleanup.status().is_success());
}

#[tokio::test]
async fn http_garden_reports_metrics() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let read = plant(&client, &server.base_url, "Read").await;
    let run = plant(&client, &server.base_url, "Run").await;

    client
        .post(format!("{}/api/habits/{}/complete", server.base_url, read.id))
        .send()
        .await
        .unwrap();

    let garden: GardenResponse = client
        .get(format!("{}/api/garden", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(garden.total, garden.habits.len());
    assert_eq!(
        garden.completed_today,
        garden.habits.iter().filter(|h| h.completed_today).count()
    );
    assert!((garden.completion_rate
        - 100.0 * garden.completed_today as f64 / garden.total as f64)
        .abs()
        < 1e-9);
    assert_eq!(garden.bloomed_count, 0);

    for id in [read.id, run.id] {
        let cleanup = client
            .delete(format!("{}/api/habits/{}", server.base_url, id))
            .send()
            .await
            .unwrap();
        assert!(cleanup.status().is_success());
    }
}

#[tokio::test]
async fn http_delete_unknown_id_is_a_noop() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: GardenResponse = client
        .get(format!("{}/api/garden", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .delete(format!("{}/api/habits/not-a-real-id", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: DeleteResponse = response.json().await.unwrap();
    assert!(!body.removed);

    let after: GardenResponse = client
        .get(format!("{}/api/garden", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.total, before.total);
}
