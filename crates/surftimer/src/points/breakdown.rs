//! Summing up a player's points.

use std::collections::btree_map::{BTreeMap, Entry};

use super::assign::{self, MapPoints, RankPoints, RankReward};
use super::completion::PlayerCompletions;
use super::groups::Groups;
use super::PointsConfig;
use crate::Result;

/// A player's points in one style, and where they came from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct PointsBreakdown {
	/// The player's display name.
	pub name: String,

	/// Sum of everything below.
	pub total: u64,

	/// Flat tier rewards of all finished maps.
	pub map_points: u64,

	/// Points from map world records.
	pub wr_points: u64,

	/// Points from bonus world records.
	pub wrb_points: u64,

	/// Points from stage world records.
	pub wrcp_points: u64,

	/// Points from map ranks 2 through 10.
	pub top10_points: u64,

	/// Points from map ranks inside one of the five bands.
	pub groups_points: u64,

	/// Points from all bonuses, world records included.
	pub bonus_points: u64,

	pub finished_maps: u32,
	pub finished_stages: u32,
	pub finished_bonuses: u32,

	/// Map world records.
	pub world_records: u32,

	/// Bonus world records.
	pub wr_bonus_count: u32,

	/// Stage world records.
	pub wr_stage_count: u32,

	/// Maps finished in ranks 2 through 10.
	pub top10s: u32,

	/// Maps finished inside one of the five bands.
	pub groups: u32,

	/// Unit points of bands 1 through 5 on the most recently scored map.
	#[cfg_attr(feature = "utoipa", schema(value_type = Vec<u64>))]
	pub group_points: [u64; 5],
}

impl PointsBreakdown {
	/// Creates an empty breakdown for a player.
	pub fn new<S>(name: S) -> Self
	where
		S: Into<String>, {
		Self { name: name.into(), ..Default::default() }
	}

	/// Adds a scored map.
	pub fn add_map(&mut self, points: &MapPoints) {
		self.finished_maps += 1;
		self.map_points += points.tier_points;
		self.group_points = points.group_units;

		match points.reward {
			RankReward::WorldRecord(wr) => {
				self.world_records += 1;
				self.wr_points += wr;
			}
			RankReward::Top10(top10) => {
				self.top10s += 1;
				self.top10_points += top10;
			}
			RankReward::Group { points, .. } => {
				self.groups += 1;
				self.groups_points += points;
			}
			RankReward::Unranked => {}
		}

		self.total += points.total();
	}

	/// Adds a scored bonus.
	pub fn add_bonus(&mut self, points: &RankPoints) {
		self.finished_bonuses += 1;
		self.bonus_points += points.points;

		if points.world_record {
			self.wr_bonus_count += 1;
			self.wrb_points += points.points;
		}

		self.total += points.points;
	}

	/// Adds a scored stage.
	pub fn add_stage(&mut self, points: &RankPoints) {
		self.finished_stages += 1;

		if points.world_record {
			self.wr_stage_count += 1;
			self.wrcp_points += points.points;
		}

		self.total += points.points;
	}

	/// Adds up the individual sources of points.
	///
	/// Bonus world records are part of [`bonus_points`], so [`wrb_points`] is not counted twice.
	///
	/// [`bonus_points`]: Self::bonus_points
	/// [`wrb_points`]: Self::wrb_points
	pub const fn sum_of_parts(&self) -> u64 {
		self.map_points
			+ self.wr_points
			+ self.top10_points
			+ self.groups_points
			+ self.bonus_points
			+ self.wrcp_points
	}
}

/// Calculates a player's points from everything they finished.
///
/// Band edges are computed once per distinct leaderboard size. The result only depends on the
/// inputs, so calling this twice with the same records yields the same breakdown.
#[tracing::instrument(
	level = "debug",
	skip(completions, config),
	fields(
		maps = completions.maps.len(),
		stages = completions.stages.len(),
		bonuses = completions.bonuses.len(),
	),
	err(Debug, level = "debug"),
)]
pub fn calculate(
	name: &str,
	completions: &PlayerCompletions,
	config: &PointsConfig,
) -> Result<PointsBreakdown> {
	let mut breakdown = PointsBreakdown::new(name);
	let mut groups_by_size = BTreeMap::<u32, Groups>::new();

	for map in &completions.maps {
		let groups = match groups_by_size.entry(map.total_finishers) {
			Entry::Occupied(entry) => *entry.get(),
			Entry::Vacant(entry) => *entry.insert(Groups::new(map.total_finishers)?),
		};

		let points = assign::score_map(map, &groups)?;

		tracing::trace!(map = %map.map, rank = map.rank, ?points, "scored map");

		breakdown.add_map(&points);
	}

	for bonus in &completions.bonuses {
		let points = assign::score_bonus(bonus)?;

		tracing::trace!(map = %bonus.map, bonus = bonus.bonus, rank = bonus.rank, ?points, "scored bonus");

		breakdown.add_bonus(&points);
	}

	for stage in &completions.stages {
		let points = assign::score_stage(stage, config)?;

		tracing::trace!(map = %stage.map, stage = stage.stage, rank = stage.rank, ?points, "scored stage");

		breakdown.add_stage(&points);
	}

	tracing::debug!(total = breakdown.total, "calculated points");

	Ok(breakdown)
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::points::completion::{BonusCompletion, MapCompletion, StageCompletion};
	use crate::{Error, Tier};

	fn completions() -> PlayerCompletions {
		PlayerCompletions {
			maps: vec![
				MapCompletion {
					map: String::from("surf_utopia_v3"),
					rank: 1,
					total_finishers: 100,
					tier: Some(Tier::One),
				},
				MapCompletion {
					map: String::from("surf_kitsune"),
					rank: 2,
					total_finishers: 100,
					tier: Some(Tier::One),
				},
				MapCompletion {
					map: String::from("surf_lux"),
					rank: 11,
					total_finishers: 20,
					tier: Some(Tier::One),
				},
				MapCompletion {
					map: String::from("surf_unrated"),
					rank: 40,
					total_finishers: 40,
					tier: None,
				},
			],
			stages: vec![
				StageCompletion { map: String::from("surf_kitsune"), stage: 1, rank: 1 },
				StageCompletion { map: String::from("surf_kitsune"), stage: 2, rank: 4 },
			],
			bonuses: vec![
				BonusCompletion {
					map: String::from("surf_utopia_v3"),
					bonus: 1,
					rank: 1,
					total_finishers: 12,
				},
				BonusCompletion {
					map: String::from("surf_lux"),
					bonus: 2,
					rank: 21,
					total_finishers: 30,
				},
			],
		}
	}

	#[test]
	fn sums_every_category() -> Result<()> {
		let breakdown = calculate("AlphaKeks", &completions(), &PointsConfig { wrcp_points: 7 })?;

		assert_eq!(breakdown, PointsBreakdown {
			name: String::from("AlphaKeks"),
			// 275 + 225 + (25 + 63) + 13 + 250 + 5 + 7
			total: 863,
			map_points: 25 + 25 + 25 + 13,
			wr_points: 250,
			wrb_points: 250,
			wrcp_points: 7,
			top10_points: 200,
			groups_points: 63,
			bonus_points: 255,
			finished_maps: 4,
			finished_stages: 2,
			finished_bonuses: 2,
			world_records: 1,
			wr_bonus_count: 1,
			wr_stage_count: 1,
			top10s: 1,
			groups: 1,
			// last map is untiered: 25 * 0.25 = 6.25, then / 1.5 each band
			group_points: [7, 5, 3, 2, 2],
		});

		assert_eq!(breakdown.sum_of_parts(), breakdown.total);

		Ok(())
	}

	#[test]
	fn is_idempotent() -> Result<()> {
		let completions = completions();
		let config = PointsConfig::default();

		assert_eq!(
			calculate("zer0.k", &completions, &config)?,
			calculate("zer0.k", &completions, &config)?,
		);

		Ok(())
	}

	#[test]
	fn no_records_no_points() -> Result<()> {
		let breakdown = calculate("newbie", &PlayerCompletions::default(), &PointsConfig::default())?;

		assert_eq!(breakdown, PointsBreakdown::new("newbie"));

		Ok(())
	}

	#[test]
	fn bonus_world_record_counts() -> Result<()> {
		let completions = PlayerCompletions {
			bonuses: vec![BonusCompletion {
				map: String::from("surf_ace"),
				bonus: 1,
				rank: 1,
				total_finishers: 1,
			}],
			..Default::default()
		};

		let breakdown = calculate("iBrahizy", &completions, &PointsConfig::default())?;

		assert_eq!(breakdown.total, 250);
		assert_eq!(breakdown.wr_bonus_count, 1);
		assert_eq!(breakdown.finished_bonuses, 1);

		Ok(())
	}

	#[test]
	fn impossible_records_fail_fast() {
		let completions = PlayerCompletions {
			maps: vec![MapCompletion {
				map: String::from("surf_void"),
				rank: 1,
				total_finishers: 0,
				tier: Some(Tier::Three),
			}],
			..Default::default()
		};

		let result = calculate("nobody", &completions, &PointsConfig::default());

		assert!(matches!(result, Err(Error::PreconditionViolated { .. })), "{result:?}");
	}

	#[test]
	fn ranks_past_the_leaderboard_fail_fast() {
		let completions = PlayerCompletions {
			maps: vec![MapCompletion {
				map: String::from("surf_beginner"),
				rank: 31,
				total_finishers: 30,
				tier: Some(Tier::One),
			}],
			..Default::default()
		};

		let result = calculate("nobody", &completions, &PointsConfig::default());

		assert!(matches!(result, Err(Error::PreconditionViolated { .. })), "{result:?}");
	}
}
