//! CLI argument handling.

use clap::Parser;
use surftimer::Style;
use url::Url;

pub fn args() -> Args {
	Args::parse()
}

/// Recalculates the points of every ranked player in a style and writes them back to the
/// database.
#[derive(Debug, Parser)]
pub struct Args {
	/// The URL of the database the daemon should connect to.
	#[arg(long, env = "DATABASE_URL")]
	pub database_url: Url,

	/// The style to recalculate, by id or name.
	#[arg(long, default_value_t = Style::NORMAL)]
	pub style: Style,

	/// Only recalculate the best `LIMIT` players.
	#[arg(long)]
	pub limit: Option<usize>,

	/// How many players are recalculated at the same time.
	#[arg(long, default_value_t = 8)]
	pub concurrency: usize,

	/// Points for every stage world record.
	#[arg(long, env = "SURFTIMER_WRCP_POINTS", default_value_t = 0)]
	pub wrcp_points: u64,

	/// Calculate everything, but don't write anything to the database.
	#[arg(long)]
	pub dry_run: bool,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;
	use color_eyre::Result;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn verify() {
		Args::command().debug_assert();
	}

	#[test]
	fn parses_style_names() -> Result<()> {
		let args = Args::try_parse_from([
			"points-daemon",
			"--database-url",
			"mysql://localhost/surftimer",
			"--style",
			"sideways",
			"--limit",
			"1",
			"--dry-run",
		])?;

		assert_eq!(args.style, Style::SIDEWAYS);
		assert_eq!(args.limit, Some(1));
		assert!(args.dry_run, "`--dry-run` was passed");

		Ok(())
	}
}
