use anyhow::Context;
use sqlx::mysql::MySqlPoolOptions;
use surftimer::points::{self, RecalculateOptions};
use surftimer::PointsConfig;
use surftimer_api::points::MySqlStore;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	if let Err(error) = dotenvy::dotenv() {
		eprintln!("WARNING: Failed to load `.env` file: {error}");
	}

	tracing_subscriber::fmt()
		.pretty()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.init();

	let args = cli::args();

	tracing::debug!(?args, "parsed arguments");

	let pool = MySqlPoolOptions::new()
		.max_connections(u32::try_from(args.concurrency).unwrap_or(u32::MAX).max(1))
		.connect(args.database_url.as_str())
		.await
		.context("failed to connect to database")?;

	let store = MySqlStore::new(pool);
	let options = RecalculateOptions {
		style: args.style,
		limit: args.limit,
		concurrency: args.concurrency,
		dry_run: args.dry_run,
		config: PointsConfig { wrcp_points: args.wrcp_points },
	};

	let summary = tokio::select! {
		summary = points::recalculate_roster(&store, &store, &store, &options) => {
			summary.context("failed to recalculate points")?
		}
		result = tokio::signal::ctrl_c() => {
			result.context("failed to receive SIGINT")?;
			tracing::warn!("received SIGINT; stopping early");
			return Ok(());
		}
	};

	tracing::info!(
		style = %args.style,
		players = summary.players,
		total_points = summary.total_points,
		dry_run = args.dry_run,
		"recalculated points",
	);

	Ok(())
}
