use anyhow::Context;
use surftimer_api::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: Failed to load `.env` file: {error}");
	}

	let _guard = surftimer_api::logging::init().context("initialize logging")?;
	let config = Config::new().context("load config")?;

	tracing::debug!(?config, "loaded config");

	if cfg!(not(feature = "production")) {
		tracing::warn!("running in development mode");
	}

	surftimer_api::run(config).await
}
