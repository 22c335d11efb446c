mod artifact;
mod config;
mod flowchart;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = config::AppConfig::from_env();
    tracing::info!(
        workers = config.render_workers,
        max_nodes = config.max_nodes,
        "flowforge configured"
    );

    let state = state::AppState::new(config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "flowforge listening");
    axum::serve(listener, app).await.expect("server failed");
}
