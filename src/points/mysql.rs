//! Reading records from and writing points to the SurfTimer tables.
//!
//! Ranks are computed as `1 + <number of strictly faster runs>`, so players with identical times
//! share the better rank.

use std::str::FromStr;

use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use surftimer::points::{
	BonusCompletion,
	MapCompletion,
	PlayerCompletions,
	PointsSink,
	RankedPlayer,
	RecordSource,
	RosterSource,
	StageCompletion,
};
use surftimer::{PointsBreakdown, SteamID, Style, Tier};

/// Finished maps with their rank, leaderboard size, and tier.
const MAP_COMPLETIONS: &str = r"
	SELECT
	  pt.mapname AS map,
	  (
	    SELECT COUNT(*) FROM ck_playertimes AS faster
	    WHERE faster.mapname = pt.mapname
	      AND faster.style = pt.style
	      AND faster.runtimepro > -1.0
	      AND faster.runtimepro < pt.runtimepro
	  ) + 1 AS `rank`,
	  (
	    SELECT COUNT(*) FROM ck_playertimes AS total
	    WHERE total.mapname = pt.mapname
	      AND total.style = pt.style
	      AND total.runtimepro > -1.0
	  ) AS total_finishers,
	  mt.tier AS tier
	FROM ck_playertimes AS pt
	LEFT JOIN ck_maptier AS mt ON mt.mapname = pt.mapname
	WHERE pt.steamid IN (?, ?)
	  AND pt.style = ?
	  AND pt.runtimepro > -1.0
	ORDER BY pt.mapname
";

/// Finished stages with their rank.
const STAGE_COMPLETIONS: &str = r"
	SELECT
	  cp.mapname AS map,
	  cp.stage AS stage,
	  (
	    SELECT COUNT(*) FROM ck_wrcps AS faster
	    WHERE faster.mapname = cp.mapname
	      AND faster.stage = cp.stage
	      AND faster.style = cp.style
	      AND faster.runtimepro > -1.0
	      AND faster.runtimepro < cp.runtimepro
	  ) + 1 AS `rank`
	FROM ck_wrcps AS cp
	WHERE cp.steamid IN (?, ?)
	  AND cp.style = ?
	  AND cp.runtimepro > -1.0
	ORDER BY cp.mapname, cp.stage
";

/// Finished bonuses with their rank and leaderboard size.
const BONUS_COMPLETIONS: &str = r"
	SELECT
	  b.mapname AS map,
	  b.zonegroup AS bonus,
	  (
	    SELECT COUNT(*) FROM ck_bonus AS faster
	    WHERE faster.mapname = b.mapname
	      AND faster.zonegroup = b.zonegroup
	      AND faster.style = b.style
	      AND faster.runtime > -1.0
	      AND faster.runtime < b.runtime
	  ) + 1 AS `rank`,
	  (
	    SELECT COUNT(*) FROM ck_bonus AS total
	    WHERE total.mapname = b.mapname
	      AND total.zonegroup = b.zonegroup
	      AND total.style = b.style
	      AND total.runtime > -1.0
	  ) AS total_finishers
	FROM ck_bonus AS b
	WHERE b.steamid IN (?, ?)
	  AND b.style = ?
	  AND b.runtime > -1.0
	ORDER BY b.mapname, b.zonegroup
";

const PLAYER_NAME: &str = "SELECT name FROM ck_playerrank WHERE steamid IN (?, ?) AND style = ?";

const RANKED_PLAYERS: &str = "SELECT steamid, name FROM ck_playerrank WHERE points > 0 AND style = ";

const UPDATE_POINTS: &str = r"
	UPDATE
	  ck_playerrank
	SET
	  name = ?,
	  points = ?,
	  wrpoints = ?,
	  wrbpoints = ?,
	  wrcppoints = ?,
	  top10points = ?,
	  groupspoints = ?,
	  mappoints = ?,
	  bonuspoints = ?,
	  finishedmapspro = ?,
	  finishedbonuses = ?,
	  finishedstages = ?,
	  wrs = ?,
	  wrbs = ?,
	  wrcps = ?,
	  top10s = ?,
	  `groups` = ?
	WHERE
	  steamid IN (?, ?)
	  AND style = ?
";

/// [`RecordSource`], [`RosterSource`] and [`PointsSink`] backed by a SurfTimer database.
#[derive(Debug, Clone)]
pub struct MySqlStore {
	#[allow(clippy::missing_docs_in_private_items)]
	pool: MySqlPool,
}

impl MySqlStore {
	pub const fn new(pool: MySqlPool) -> Self {
		Self { pool }
	}
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(FromRow)]
struct MapRow {
	map: String,
	rank: i64,
	total_finishers: i64,
	tier: Option<i32>,
}

impl TryFrom<MapRow> for MapCompletion {
	type Error = sqlx::Error;

	fn try_from(row: MapRow) -> sqlx::Result<Self> {
		Ok(Self {
			map: row.map,
			rank: to_u32(row.rank)?,
			total_finishers: to_u32(row.total_finishers)?,
			tier: Tier::from_raw(row.tier),
		})
	}
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(FromRow)]
struct StageRow {
	map: String,
	stage: i32,
	rank: i64,
}

impl TryFrom<StageRow> for StageCompletion {
	type Error = sqlx::Error;

	fn try_from(row: StageRow) -> sqlx::Result<Self> {
		Ok(Self {
			map: row.map,
			stage: to_u32(row.stage)?,
			rank: to_u32(row.rank)?,
		})
	}
}

#[allow(clippy::missing_docs_in_private_items)]
#[derive(FromRow)]
struct BonusRow {
	map: String,
	bonus: i32,
	rank: i64,
	total_finishers: i64,
}

impl TryFrom<BonusRow> for BonusCompletion {
	type Error = sqlx::Error;

	fn try_from(row: BonusRow) -> sqlx::Result<Self> {
		Ok(Self {
			map: row.map,
			bonus: to_u32(row.bonus)?,
			rank: to_u32(row.rank)?,
			total_finishers: to_u32(row.total_finishers)?,
		})
	}
}

/// Converts a signed database integer, failing on negative or oversized values.
fn to_u32<T>(value: T) -> sqlx::Result<u32>
where
	u32: TryFrom<T, Error = std::num::TryFromIntError>,
{
	u32::try_from(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Both ways a SteamID can be written into the `steamid` columns.
///
/// The game writes `STEAM_0:Y:Z` or `STEAM_1:Y:Z` depending on the server's universe, so lookups
/// have to match either prefix.
fn spellings(steam_id: SteamID) -> [String; 2] {
	let (y, z) = (steam_id.y_bit(), steam_id.account_number());

	[format!("STEAM_0:{y}:{z}"), format!("STEAM_1:{y}:{z}")]
}

/// Runs one of the completion queries and converts its rows.
async fn fetch_completions<Row, Completion>(
	pool: &MySqlPool,
	query: &'static str,
	steam_id: SteamID,
	style: Style,
) -> sqlx::Result<Vec<Completion>>
where
	Row: for<'r> FromRow<'r, sqlx::mysql::MySqlRow> + Send + Unpin,
	Completion: TryFrom<Row, Error = sqlx::Error>,
{
	let [steam0, steam1] = spellings(steam_id);

	sqlx::query_as::<_, Row>(query)
		.bind(steam0)
		.bind(steam1)
		.bind(style.id())
		.fetch_all(pool)
		.await?
		.into_iter()
		.map(Completion::try_from)
		.collect()
}

impl RecordSource for MySqlStore {
	type Error = sqlx::Error;

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn player_name(&self, steam_id: SteamID, style: Style) -> sqlx::Result<Option<String>> {
		let [steam0, steam1] = spellings(steam_id);
		let name = sqlx::query_scalar::<_, Option<String>>(PLAYER_NAME)
			.bind(steam0)
			.bind(steam1)
			.bind(style.id())
			.fetch_optional(&self.pool)
			.await?;

		Ok(name.map(Option::unwrap_or_default))
	}

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn completions(&self, steam_id: SteamID, style: Style) -> sqlx::Result<PlayerCompletions> {
		let (maps, stages, bonuses) = futures::try_join!(
			fetch_completions::<MapRow, _>(&self.pool, MAP_COMPLETIONS, steam_id, style),
			fetch_completions::<StageRow, _>(&self.pool, STAGE_COMPLETIONS, steam_id, style),
			fetch_completions::<BonusRow, _>(&self.pool, BONUS_COMPLETIONS, steam_id, style),
		)?;

		tracing::trace!(maps = maps.len(), stages = stages.len(), bonuses = bonuses.len());

		Ok(PlayerCompletions { maps, stages, bonuses })
	}
}

impl RosterSource for MySqlStore {
	type Error = sqlx::Error;

	#[tracing::instrument(level = "debug", skip(self), err(Debug, level = "debug"))]
	async fn ranked_players(
		&self,
		style: Style,
		limit: Option<usize>,
	) -> sqlx::Result<Vec<RankedPlayer>> {
		let mut query = QueryBuilder::<MySql>::new(RANKED_PLAYERS);

		query.push_bind(style.id()).push(" ORDER BY points DESC");

		if let Some(limit) = limit {
			query
				.push(" LIMIT ")
				.push_bind(u64::try_from(limit).unwrap_or(u64::MAX));
		}

		let rows = query
			.build_query_as::<(String, Option<String>)>()
			.fetch_all(&self.pool)
			.await?;

		let players = rows
			.into_iter()
			.filter_map(|(steam_id, name)| match SteamID::from_str(&steam_id) {
				Ok(steam_id) => Some(RankedPlayer { steam_id, name: name.unwrap_or_default() }),
				Err(error) => {
					tracing::warn!(%steam_id, %error, "skipping player with malformed SteamID");
					None
				}
			})
			.collect();

		Ok(players)
	}
}

impl PointsSink for MySqlStore {
	type Error = sqlx::Error;

	#[tracing::instrument(
		level = "debug",
		skip(self, breakdown),
		fields(total = breakdown.total),
		err(Debug, level = "debug"),
	)]
	async fn store(
		&self,
		steam_id: SteamID,
		style: Style,
		breakdown: &PointsBreakdown,
	) -> sqlx::Result<()> {
		let [steam0, steam1] = spellings(steam_id);
		let result = sqlx::query(UPDATE_POINTS)
			.bind(&breakdown.name)
			.bind(breakdown.total)
			.bind(breakdown.wr_points)
			.bind(breakdown.wrb_points)
			.bind(breakdown.wrcp_points)
			.bind(breakdown.top10_points)
			.bind(breakdown.groups_points)
			.bind(breakdown.map_points)
			.bind(breakdown.bonus_points)
			.bind(breakdown.finished_maps)
			.bind(breakdown.finished_bonuses)
			.bind(breakdown.finished_stages)
			.bind(breakdown.world_records)
			.bind(breakdown.wr_bonus_count)
			.bind(breakdown.wr_stage_count)
			.bind(breakdown.top10s)
			.bind(breakdown.groups)
			.bind(steam0)
			.bind(steam1)
			.bind(style.id())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			tracing::warn!(%steam_id, %style, "player has no rank entry; nothing updated");
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn matches_both_universes() -> Result<()> {
		let expected = [String::from("STEAM_0:1:161178172"), String::from("STEAM_1:1:161178172")];

		assert_eq!(spellings(SteamID::new("STEAM_0:1:161178172")?), expected);
		assert_eq!(spellings(SteamID::new("STEAM_1:1:161178172")?), expected);

		Ok(())
	}

	#[test]
	fn every_steamid_filter_takes_both_spellings() {
		for query in [MAP_COMPLETIONS, STAGE_COMPLETIONS, BONUS_COMPLETIONS, PLAYER_NAME, UPDATE_POINTS] {
			assert!(query.contains("steamid IN (?, ?)"), "{query}");
			assert!(!query.contains("steamid = ?"), "{query}");
		}
	}
}
