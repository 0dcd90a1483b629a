use devconnector_api::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    devconnector_api::init_tracing();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();

    devconnector_api::serve(config).await
}
