use rugcheck::orchestration::write_report;
use rugcheck::{AppError, ChainSource, Config, JsonRpcChainSource, TokenAnalyzer};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let source: Arc<dyn ChainSource> = Arc::new(JsonRpcChainSource::new(config.rpc_url.clone()));
    let analyzer = TokenAnalyzer::new(source, config.factory_address, config.quote_assets());

    let report = analyzer.analyze(config.token_address).await?;
    let path = write_report(&report, &config.output_dir).await?;
    tracing::info!("Report saved to {}", path.display());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
