use anyhow::Context;
use pdf_study::{config::AppConfig, logger, service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    logger::log(&format!(
        "Serving {} on {}",
        service::FILL_BLANK_PATH,
        config.addr
    ));
    println!("Listening on http://{}{}", config.addr, service::FILL_BLANK_PATH);

    axum::serve(listener, service::router())
        .await
        .context("Server error")?;

    Ok(())
}
