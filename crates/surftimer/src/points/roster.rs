//! Recalculating points for everyone in a style.

use std::error::Error as StdError;

use futures_util::{stream, StreamExt, TryStreamExt};

use super::source::{PointsSink, RankedPlayer, RecordSource, RosterSource};
use super::{calculate, PointsBreakdown, PointsConfig};
use crate::{SteamID, Style};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Knobs for [`recalculate_roster()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecalculateOptions {
	/// The style to recalculate.
	pub style: Style,

	/// Only process the first `limit` players of the roster.
	pub limit: Option<usize>,

	/// How many players are processed at the same time.
	pub concurrency: usize,

	/// Calculate everything, but don't store the results.
	pub dry_run: bool,

	pub config: PointsConfig,
}

impl Default for RecalculateOptions {
	fn default() -> Self {
		Self {
			style: Style::NORMAL,
			limit: None,
			concurrency: 8,
			dry_run: false,
			config: PointsConfig::default(),
		}
	}
}

/// What a roster run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecalculationSummary {
	/// How many players were recalculated.
	pub players: usize,

	/// Sum of all calculated totals.
	pub total_points: u64,
}

/// Errors that abort a roster run.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
	#[error("failed to fetch roster")]
	Roster(#[source] BoxError),

	#[error("failed to fetch records of {steam_id}")]
	Records {
		steam_id: SteamID,
		#[source]
		source: BoxError,
	},

	#[error("failed to calculate points of {steam_id}")]
	Points {
		steam_id: SteamID,
		#[source]
		source: crate::Error,
	},

	#[error("failed to store points of {steam_id}")]
	Store {
		steam_id: SteamID,
		#[source]
		source: BoxError,
	},
}

/// Recalculates the points of every ranked player in a style.
///
/// Up to `options.concurrency` players are calculated at once. Results are handed to `sink` in
/// the same order the roster returned them, so runs with different concurrency store the exact
/// same values in the exact same order.
#[tracing::instrument(level = "info", skip_all, fields(
	style = %options.style,
	limit = ?options.limit,
	concurrency = options.concurrency,
	dry_run = options.dry_run,
), err(Debug))]
pub async fn recalculate_roster<Records, Roster, Sink>(
	records: &Records,
	roster: &Roster,
	sink: &Sink,
	options: &RecalculateOptions,
) -> Result<RecalculationSummary, RosterError>
where
	Records: RecordSource,
	Roster: RosterSource,
	Sink: PointsSink,
{
	let players = roster
		.ranked_players(options.style, options.limit)
		.await
		.map_err(|err| RosterError::Roster(Box::new(err)))?;

	// the source should already honor the limit, but not every source can
	let players = match options.limit {
		Some(limit) => players.into_iter().take(limit).collect::<Vec<_>>(),
		None => players,
	};

	tracing::info!(players = players.len(), "recalculating points");

	let mut results = stream::iter(players)
		.map(|player| recalculate_player(records, player, options))
		.buffered(options.concurrency.max(1));

	let mut summary = RecalculationSummary::default();

	while let Some((player, breakdown)) = results.try_next().await? {
		if !options.dry_run {
			sink.store(player.steam_id, options.style, &breakdown)
				.await
				.map_err(|err| RosterError::Store {
					steam_id: player.steam_id,
					source: Box::new(err),
				})?;
		}

		tracing::debug!(steam_id = %player.steam_id, name = %player.name, total = breakdown.total, "recalculated player");

		summary.players += 1;
		summary.total_points += breakdown.total;
	}

	tracing::info!(players = summary.players, total_points = summary.total_points, "done");

	Ok(summary)
}

async fn recalculate_player<Records>(
	records: &Records,
	player: RankedPlayer,
	options: &RecalculateOptions,
) -> Result<(RankedPlayer, PointsBreakdown), RosterError>
where
	Records: RecordSource,
{
	let completions = records
		.completions(player.steam_id, options.style)
		.await
		.map_err(|err| RosterError::Records { steam_id: player.steam_id, source: Box::new(err) })?;

	let breakdown = calculate(&player.name, &completions, &options.config)
		.map_err(|source| RosterError::Points { steam_id: player.steam_id, source })?;

	Ok((player, breakdown))
}
