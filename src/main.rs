mod db;
mod error;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // OAuth config is non-fatal: without it the login endpoints answer 503
    // and the public read endpoints keep working.
    let github = match services::auth::GitHubConfig::from_env() {
        Some(config) => Some(config),
        None => {
            tracing::warn!("GitHub OAuth env vars not set — login disabled");
            None
        }
    };

    let state = state::AppState::new(pool, github);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "pinboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
