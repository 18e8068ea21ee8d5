use forkcache::server::{
    config::Config, error::Error, model::app::AppState, router, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    startup::init_tracing(config.log_level);

    if let Err(e) = run(config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    if config.github_pat.is_none() {
        tracing::warn!("GITHUB_PAT is not set, fork and delete requests will fail");
    }

    let github_client = startup::build_github_client(&config)?;
    let db = startup::connect_to_database(&config).await?;

    let app = router::routes().with_state(AppState::new(db, github_client));

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!(address = %config.bind_address, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
