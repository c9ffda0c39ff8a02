#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clout_observability::init();

    let config = clout_api::config::AppConfig::from_env();
    let bind = config.bind.clone();
    let app = clout_api::app::build_app(config)?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
