//! The seams between the points engine and wherever records live.

use std::error::Error as StdError;
use std::future::Future;

use super::{PlayerCompletions, PointsBreakdown};
use crate::{SteamID, Style};

/// A player whose points should be recalculated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedPlayer {
	pub steam_id: SteamID,
	pub name: String,
}

/// Reads a player's finished maps, stages and bonuses.
pub trait RecordSource: Send + Sync {
	type Error: StdError + Send + Sync + 'static;

	/// The player's current display name, if they are known at all.
	fn player_name(
		&self,
		steam_id: SteamID,
		style: Style,
	) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

	/// Every completion of the player in `style`, each with its rank and leaderboard size.
	fn completions(
		&self,
		steam_id: SteamID,
		style: Style,
	) -> impl Future<Output = Result<PlayerCompletions, Self::Error>> + Send;
}

/// Lists the players that hold points in a style.
pub trait RosterSource: Send + Sync {
	type Error: StdError + Send + Sync + 'static;

	/// Players with more than 0 points, best first.
	///
	/// At most `limit` players are returned if a limit is given.
	fn ranked_players(
		&self,
		style: Style,
		limit: Option<usize>,
	) -> impl Future<Output = Result<Vec<RankedPlayer>, Self::Error>> + Send;
}

/// Persists calculated points.
pub trait PointsSink: Send + Sync {
	type Error: StdError + Send + Sync + 'static;

	fn store(
		&self,
		steam_id: SteamID,
		style: Style,
		breakdown: &PointsBreakdown,
	) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
