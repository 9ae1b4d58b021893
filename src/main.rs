use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use student_api::auth::SessionManager;
use student_api::handlers::{auth, statistics, students};
use student_api::middleware::session_auth_middleware;
use student_api::state::AppState;
use student_api::store::StudentStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up STUDENT_API_DATA_FILE etc.
    let _ = dotenvy::dotenv();

    let config = student_api::config::config();
    tracing_subscriber::fmt::init();
    tracing::info!("Starting student API in {:?} mode", config.environment);

    let store = StudentStore::load(&config.store.data_file)
        .await
        .unwrap_or_else(|e| panic!("failed to load {}: {}", config.store.data_file, e));

    let ttl = chrono::Duration::hours(config.security.session_expiry_hours as i64);
    let sessions = SessionManager::with_system_clock(ttl);
    spawn_session_sweeper(
        sessions.clone(),
        config.security.session_sweep_interval_secs,
    );

    let app = app(AppState {
        sessions,
        store,
    });

    // Allow tests or deployments to override port via env
    let port = std::env::var("STUDENT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Student Management System server running on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let config = student_api::config::config();

    // Token acquisition and release stay outside the gate; logout accepts
    // an optional bearer token and never fails.
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout));

    // Everything touching student data sits behind the gate.
    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/students", get(students::list).post(students::create))
        .route(
            "/api/students/:id",
            get(students::get_one)
                .put(students::update)
                .delete(students::delete),
        )
        .route("/api/statistics", get(statistics::statistics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        // Browser front-end; requests not matching a route fall through here
        .fallback_service(ServeDir::new(&config.server.static_dir))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drops expired sessions; lookups already treat expired
/// entries as absent, the sweep just bounds the map's size.
fn spawn_session_sweeper(sessions: SessionManager, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let pruned = sessions.prune_expired();
            if pruned > 0 {
                tracing::debug!(pruned, "removed expired sessions");
            }
        }
    });
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let now = chrono::Utc::now();
    let students = state.store.list().await.len();

    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "students": students
        }
    }))
}
