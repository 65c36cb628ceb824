use axum::extract::Path;
use axum::{routing::get, Json, Router};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

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

// ---------------------------------------------------------------------------
// Stub league API. Lives on its own thread with its own runtime so it
// outlives the per-test runtimes.
// ---------------------------------------------------------------------------

struct StubApi {
    base_url: String,
}

static STUB: Lazy<StubApi> = Lazy::new(StubApi::start);

impl StubApi {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub port");
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            runtime.block_on(async move {
                listener.set_nonblocking(true).unwrap();
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, stub_router()).await.unwrap();
            });
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }
}

fn stub_router() -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route(
            "/seasons",
            get(|| async { Json(json!({"seasons": [2024, 2023, 2022]})) }),
        )
        .route(
            "/teams",
            get(|| async {
                Json(json!({"year": 2024, "teams": [
                    {
                        "team_name": "Inferno", "owner": "Blaze Runner", "rank": 1,
                        "wins": 11, "losses": 3, "ties": 0,
                        "points_for": 1612.4, "points_against": 1401.2, "season_year": 2024
                    },
                    {
                        "team_name": "Tsunami", "owner": "Wave Rider", "rank": 2,
                        "wins": 10, "losses": 4,
                        "points_for": 1544.0, "points_against": 1428.9, "season_year": 2024
                    }
                ]}))
            }),
        )
        .route(
            "/champions",
            get(|| async {
                Json(json!({"champions": [
                    {"year": 2024, "team": "Inferno", "owner": "Blaze Runner", "record": "11-3", "points_for": 1612.4},
                    {"year": 2023, "team": "Tsunami", "owner": "Wave Rider", "record": "10-4", "points_for": 1544.0}
                ]}))
            }),
        )
        .route(
            "/managers",
            get(|| async {
                Json(json!({"managers": [
                    {
                        "name": "Blaze Runner", "all_time_record": "45-25",
                        "total_wins": 45, "total_losses": 25, "championships": 2,
                        "playoff_appearances": 4, "avg_points_for": 1550.3, "seasons_played": 5
                    }
                ]}))
            }),
        )
        .route("/manager/:name", get(manager_profile))
        .route(
            "/rivalries/:name",
            get(|| async {
                Json(json!({"rivalries": [{"opponent": "Wave Rider", "wins": 6, "losses": 4}]}))
            }),
        )
        .route(
            "/weekly-results/:name",
            get(|| async {
                Json(json!({"weekly_results": [{"week": 1, "result": "W", "score": 132.5}]}))
            }),
        )
        .route(
            "/records",
            get(|| async {
                Json(json!({"records": [
                    {"category": "Highest Single Game Score", "value": "188.4", "holder": "Blaze Runner", "year": "2023"}
                ]}))
            }),
        )
        .route(
            "/luck",
            get(|| async {
                Json(json!({"luck_rankings": [{"manager": "Wave Rider", "luck_score": 1.8}]}))
            }),
        )
        .route(
            "/matchups",
            get(|| async {
                Json(json!({"year": 2024, "week": null, "max_week": 14, "matchups": [
                    {"week": 1, "home_team": "Inferno", "home_score": 132.5,
                     "away_team": "Tsunami", "away_score": 120.1, "bracket_type": null}
                ]}))
            }),
        )
        .route("/player-stats/:team", get(player_stats))
}

async fn manager_profile(Path(name): Path<String>) -> Result<Json<Value>, axum::http::StatusCode> {
    if name != "Blaze Runner" {
        return Err(axum::http::StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "name": "Blaze Runner",
        "all_time_record": "45-25",
        "total_wins": 45, "total_losses": 25, "championships": 2,
        "playoff_appearances": 4, "avg_points_for": 1550.3, "seasons_played": 5,
        "season_history": [
            {"season_year": 2024, "team_name": "Inferno", "rank": 1,
             "wins": 11, "losses": 3, "points_for": 1612.4, "points_against": 1401.2},
            {"season_year": 2023, "team_name": "Inferno", "rank": 3,
             "wins": 9, "losses": 5, "points_for": 1502.0, "points_against": 1476.8}
        ]
    })))
}

async fn player_stats(Path(team): Path<String>) -> Json<Value> {
    Json(json!({
        "viewing_season": 2022,
        "seasons_data": {
            "2022": [
                {"week": 5, "opponent_team": "HOU", "def_sacks": 2, "points_allowed": 13, "fantasy_points_ppr": 9.0},
                {"week": 1, "opponent_team": "WSH", "def_sacks": 4, "def_interceptions": 1,
                 "points_allowed": 22, "fantasy_points_ppr": 7.5}
            ]
        },
        "season_totals": {
            "2022": {"games": 2, "def_sacks": 6, "def_interceptions": 1,
                     "points_allowed": 35, "avg_points_allowed": 17.5, "fantasy_points_ppr": 16.5},
            "2021": {"games": 17, "def_sacks": 38, "points_allowed": 390,
                     "avg_points_allowed": 22.9, "fantasy_points_ppr": 121.0}
        },
        "weekly_stats": [{"week": 1, "opponent_team": team}]
    }))
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/health")).send().await {
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

async fn spawn_server(api_base: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_league_web"))
        .env("PORT", port.to_string())
        .env("LEAGUE_API_BASE", api_base)
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
    let server = Arc::new(spawn_server(&STUB.base_url).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_text(client: &Client, url: String) -> (reqwest::StatusCode, String) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_home_renders_latest_standings() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let (status, body) = get_text(&client, format!("{}/", server.base_url)).await;
    assert!(status.is_success());
    assert!(body.contains("2024 Standings"));
    assert!(body.contains("Inferno"));
    assert!(body.contains("Blaze Runner"));
    assert!(body.contains("Reigning Champion"));
}

#[tokio::test]
async fn http_manager_name_with_space_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // The stub only answers for the exact name, so this passing means the
    // frontend re-encoded the decoded route parameter correctly.
    let (status, body) = get_text(
        &client,
        format!("{}/manager/Blaze%20Runner", server.base_url),
    )
    .await;
    assert!(status.is_success());
    assert!(body.contains("45-25"));
    assert!(body.contains("Season History"));
    assert!(body.contains("Rivalries"));
}

#[tokio::test]
async fn http_unknown_manager_shows_not_found_message() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let (status, body) = get_text(&client, format!("{}/manager/Nobody", server.base_url)).await;
    assert!(status.is_success());
    assert!(body.contains("Manager not found"));
}

#[tokio::test]
async fn http_legacy_dst_renders_both_views() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let (status, body) = get_text(
        &client,
        format!("{}/legacy/dst/JAX?season=2022", server.base_url),
    )
    .await;
    assert!(status.is_success());
    // Current-season rows come back sorted by week even though the stub
    // delivers them out of order.
    let week1 = body.find("<td>WSH</td>").expect("week 1 row");
    let week5 = body.find("<td>HOU</td>").expect("week 5 row");
    assert!(week1 < week5);
    assert!(body.contains("Career Summary by Season"));
    let pos2022 = body.find("<strong>2022</strong>").unwrap();
    let pos2021 = body.find("<strong>2021</strong>").unwrap();
    assert!(pos2022 < pos2021);
}

#[tokio::test]
async fn http_bad_season_query_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let (status, _) = get_text(
        &client,
        format!("{}/history?season=dragons", server.base_url),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_health_reports_upstream() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["overall"], "healthy");
    assert_eq!(body["upstream"], "healthy");
}

#[tokio::test]
async fn http_dead_upstream_still_renders_pages() {
    let _guard = TEST_LOCK.lock().await;
    // Port 9 (discard) refuses connections; every loader must fall back.
    let server = spawn_server("http://127.0.0.1:9").await;
    let client = Client::new();

    let (status, body) = get_text(&client, format!("{}/", server.base_url)).await;
    assert!(status.is_success());
    assert!(body.contains("No standings available"));

    let (status, body) = get_text(&client, format!("{}/tidbits", server.base_url)).await;
    assert!(status.is_success());
    assert!(body.contains("Failed to load data"));

    let (status, body) = get_text(&client, format!("{}/records", server.base_url)).await;
    assert!(status.is_success());
    assert!(body.contains("No records available"));
}
