// Define data modules
mod colors; // Category color palette and hash fallback
mod models; // Data structures (Task, DayWindow, Db, etc.)
mod routes_plan; // HTTP handler for the day plan API
mod routes_tasks; // HTTP handlers for task, settings & color APIs
mod scheduler; // Core day scheduling logic
mod store; // Persistent storage (load/save db.json)

// Import axum routing utilities and Router
use axum::{
    routing::{get, post, put}, // HTTP method helpers
    Router, // Main router type
};
use std::net::SocketAddr;
use tower_http::services::ServeDir; // Used to serve static files (HTML/CSS/JS)
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api = Router::new()
        // plan
        .route("/plan", get(routes_plan::get_plan))
        // tasks
        .route("/tasks", get(routes_tasks::get_tasks).post(routes_tasks::create_task))
        .route("/tasks/order", put(routes_tasks::reorder_tasks))
        .route("/tasks/:id", put(routes_tasks::update_task).delete(routes_tasks::delete_task))
        .route("/tasks/:id/toggle", post(routes_tasks::toggle_task))
        // settings
        .route("/settings", get(routes_tasks::get_settings).put(routes_tasks::put_settings))
        // category colors
        .route("/colors", get(routes_tasks::get_colors).put(routes_tasks::put_colors));

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new("static"));

    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();

    tracing::info!("server running at http://{addr}");
    tracing::info!("static files: http://{addr}/");
    tracing::info!("API base:     http://{addr}/api");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
