use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const CSE: &str = "BE - Computer Science and Engineering";
pub const IT: &str = "BE - Information Technology";
pub const ECE: &str = "BE - Electronics and Communication Engineering";
pub const CIVIL: &str = "BE - Civil Engineering";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

/// Four known records across three departments. CGPA values are exactly
/// representable doubles so statistics assertions stay stable.
fn fixture_data() -> Value {
    let record = |n: &str, course: &str, year: u8, cgpa: f64| {
        json!({
            "id": format!("fixture-{n}"),
            "firstName": "Student",
            "lastName": n,
            "email": format!("student{n}@gce.edu.in"),
            "phone": "9876543210",
            "gender": "Male",
            "address": "12, College Road, Erode, Tamil Nadu",
            "enrollmentDate": "2022-07-15",
            "course": course,
            "year": year,
            "cgpa": cgpa,
            "college": "Government College of Engineering, Erode",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    };
    json!({
        "students": [
            record("001", CSE, 2, 8.0),
            record("002", CSE, 3, 7.5),
            record("003", IT, 1, 6.9),
            record("004", ECE, 4, 8.75),
        ]
    })
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Each test binary gets its own data file seeded with the fixtures
        let data_file: PathBuf =
            std::env::temp_dir().join(format!("student-api-test-{}.json", port));
        std::fs::write(&data_file, serde_json::to_vec_pretty(&fixture_data())?)
            .context("failed to write fixture data file")?;

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/student-api");
        cmd.env("STUDENT_API_PORT", port.to_string())
            .env("STUDENT_API_DATA_FILE", &data_file)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Logs in and returns the response body; asserts the 200.
pub async fn login(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
    role: &str,
) -> Result<Value> {
    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "username": username, "password": password, "role": role }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "login as {} failed: {}",
        username,
        res.status()
    );
    Ok(res.json().await?)
}

/// Logs in and returns just the bearer token.
pub async fn login_token(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
    role: &str,
) -> Result<String> {
    let body = login(client, base_url, username, password, role).await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response carries no token")
}
