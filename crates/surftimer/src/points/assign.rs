//! Points for individual completions.
//!
//! Maps are worth the most: every finish earns a flat amount for the map's tier, and good ranks
//! earn a share of the map's world record value on top of that. Bonuses are scored from a fixed
//! rank table, and stages only pay out for the world record.

use super::completion::{BonusCompletion, Completion, MapCompletion, StageCompletion};
use super::groups::Groups;
use super::PointsConfig;
use crate::{Result, Tier};

/// Points awarded for a bonus, by rank. Anything past the end of the table earns
/// [`BONUS_POINTS_FALLBACK`].
pub const BONUS_POINTS: [u64; 20] = [
	250, 235, 220, 205, 190, 175, 160, 145, 130, 100, 95, 90, 80, 70, 60, 50, 40, 30, 20, 10,
];

/// Points awarded for a bonus finished outside the top 20.
pub const BONUS_POINTS_FALLBACK: u64 = 5;

/// Share of the world record value paid out to ranks 2 through 10.
const TOP10_FACTORS: [(u32, f64); 9] = [
	(2, 0.80),
	(3, 0.75),
	(4, 0.70),
	(5, 0.65),
	(6, 0.60),
	(7, 0.55),
	(8, 0.50),
	(9, 0.45),
	(10, 0.40),
];

/// Reward of band 1 as a fraction of the world record value.
const GROUP_1_FRACTION: f64 = 0.25;

/// Every band is worth this much less than the one above it.
const GROUP_DECAY: f64 = 1.5;

/// Flat points for finishing a map, independent of rank.
pub const fn tier_points(tier: Option<Tier>) -> u64 {
	match tier {
		Some(Tier::One) => 25,
		Some(Tier::Two) => 50,
		Some(Tier::Three) => 100,
		Some(Tier::Four) => 200,
		Some(Tier::Five) => 400,
		Some(Tier::Six) => 600,
		Some(Tier::Seven) => 800,
		Some(Tier::Eight) => 1000,
		None => 13,
	}
}

/// The (fractional) world record value of a map.
///
/// Tiers 1 and 2 always include their offset and are then floored; tiers 3 to 8 only add the
/// offset once the scaled population alone exceeds the floor.
pub fn wr_points(tier: Option<Tier>, total_finishers: u32) -> f64 {
	let n = f64::from(total_finishers);

	let floored = |scaled: f64, floor: f64, offset: f64| {
		if scaled < floor { floor } else { scaled + offset }
	};

	match tier {
		Some(Tier::One) => f64::max(250.0, n * 1.75 / 6.0 + 58.5),
		Some(Tier::Two) => f64::max(500.0, n * 2.8 / 5.0 + 82.15),
		Some(Tier::Three) => floored(n * 3.5 / 4.0, 750.0, 117.0),
		Some(Tier::Four) => floored(n * 5.74 / 4.0, 1000.0, 164.25),
		Some(Tier::Five) => floored(n * 7.0 / 4.0, 1250.0, 234.0),
		Some(Tier::Six) => floored(n * 14.0 / 4.0, 1500.0, 328.0),
		Some(Tier::Seven) => floored(n * 21.0 / 4.0, 1750.0, 420.0),
		Some(Tier::Eight) => floored(n * 30.0 / 4.0, 2000.0, 560.0),
		None => 25.0,
	}
}

/// [`wr_points()`], rounded up to whole points.
pub fn iwr_points(tier: Option<Tier>, total_finishers: u32) -> u64 {
	ceil_points(wr_points(tier, total_finishers))
}

/// Points for a top 10 finish other than the world record.
///
/// Returns [`None`] for ranks outside of `2..=10`.
pub fn top10_points(iwr_points: u64, rank: u32) -> Option<u64> {
	#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
	let iwr_points = iwr_points as f64;

	TOP10_FACTORS
		.iter()
		.find(|&&(top10_rank, _)| top10_rank == rank)
		.map(|&(_, factor)| ceil_points(iwr_points * factor))
}

/// Unit points of the five bands for a map worth `iwr_points`.
pub fn group_units(iwr_points: u64) -> [f64; 5] {
	#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
	let mut unit = iwr_points as f64 * GROUP_1_FRACTION;

	[(); 5].map(|()| {
		let current = unit;
		unit /= GROUP_DECAY;
		current
	})
}

/// Points for a bonus at the given rank.
pub fn bonus_points(rank: u32) -> u64 {
	usize::try_from(rank)
		.ok()
		.and_then(|rank| rank.checked_sub(1))
		.and_then(|idx| BONUS_POINTS.get(idx))
		.copied()
		.unwrap_or(BONUS_POINTS_FALLBACK)
}

/// What a map completion earned through its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankReward {
	/// Rank 1: the full world record value.
	WorldRecord(u64),

	/// Ranks 2 through 10.
	Top10(u64),

	/// Inside one of the five bands.
	Group { band: u8, points: u64 },

	/// Past the last band.
	Unranked,
}

impl RankReward {
	pub const fn points(&self) -> u64 {
		match *self {
			Self::WorldRecord(points) | Self::Top10(points) | Self::Group { points, .. } => points,
			Self::Unranked => 0,
		}
	}
}

/// Everything a single map completion is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPoints {
	/// Flat reward for the map's tier.
	pub tier_points: u64,

	/// The map's world record value; what rank 1 earns.
	pub wr_value: u64,

	/// The rank-dependent part.
	pub reward: RankReward,

	/// Unit points of every band on this map, rounded up.
	pub group_units: [u64; 5],
}

impl MapPoints {
	pub const fn total(&self) -> u64 {
		self.tier_points + self.reward.points()
	}
}

/// Points for a completion scored purely by rank (bonuses and stages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPoints {
	pub points: u64,
	pub world_record: bool,
}

/// Scores a finished map against the bands of its leaderboard.
///
/// `groups` must have been computed for `map.total_finishers`.
pub fn score_map(map: &MapCompletion, groups: &Groups) -> Result<MapPoints> {
	map.validate()?;

	let wr_value = iwr_points(map.tier, map.total_finishers);
	let units = group_units(wr_value);

	let reward = if map.rank == 1 {
		RankReward::WorldRecord(wr_value)
	} else if let Some(points) = top10_points(wr_value, map.rank) {
		RankReward::Top10(points)
	} else if let Some(band) = groups.band_of(map.rank) {
		let unit = units
			.iter()
			.zip(1_u8..)
			.find_map(|(&unit, number)| (number == band.number).then_some(unit))
			.unwrap_or(0.0);

		RankReward::Group { band: band.number, points: ceil_points(unit) }
	} else {
		RankReward::Unranked
	};

	Ok(MapPoints {
		tier_points: tier_points(map.tier),
		wr_value,
		reward,
		group_units: units.map(ceil_points),
	})
}

/// Scores a finished bonus.
pub fn score_bonus(bonus: &BonusCompletion) -> Result<RankPoints> {
	bonus.validate()?;

	Ok(RankPoints { points: bonus_points(bonus.rank), world_record: bonus.rank == 1 })
}

/// Scores a finished stage. Only stage world records are worth anything, and only as much as
/// the configuration says.
pub fn score_stage(stage: &StageCompletion, config: &PointsConfig) -> Result<RankPoints> {
	stage.validate()?;

	let world_record = stage.rank == 1;
	let points = if world_record { config.wrcp_points } else { 0 };

	Ok(RankPoints { points, world_record })
}

#[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_points(value: f64) -> u64 {
	value.ceil() as u64
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;
	use pretty_assertions::assert_eq;

	use super::*;

	fn map(tier: Option<Tier>, rank: u32, total_finishers: u32) -> MapCompletion {
		MapCompletion { map: String::from("surf_mesa"), rank, total_finishers, tier }
	}

	fn score(tier: Option<Tier>, rank: u32, total_finishers: u32) -> Result<MapPoints> {
		let groups = Groups::new(total_finishers)?;
		Ok(score_map(&map(tier, rank, total_finishers), &groups)?)
	}

	#[test]
	fn bonus_table() {
		let table = [
			(1, 250),
			(2, 235),
			(3, 220),
			(4, 205),
			(5, 190),
			(6, 175),
			(7, 160),
			(8, 145),
			(9, 130),
			(10, 100),
			(11, 95),
			(12, 90),
			(13, 80),
			(14, 70),
			(15, 60),
			(16, 50),
			(17, 40),
			(18, 30),
			(19, 20),
			(20, 10),
			(21, 5),
			(5000, 5),
		];

		for (rank, points) in table {
			assert_eq!(bonus_points(rank), points, "bonus rank {rank}");
		}
	}

	#[test]
	fn tier_base_points() {
		let table = [
			(Some(Tier::One), 25),
			(Some(Tier::Two), 50),
			(Some(Tier::Three), 100),
			(Some(Tier::Four), 200),
			(Some(Tier::Five), 400),
			(Some(Tier::Six), 600),
			(Some(Tier::Seven), 800),
			(Some(Tier::Eight), 1000),
			(None, 13),
		];

		for (tier, points) in table {
			assert_eq!(tier_points(tier), points, "{tier:?}");
		}
	}

	#[test]
	fn tier_one_world_record() -> Result<()> {
		// max(250, 100 * 1.75 / 6 + 58.5) = max(250, 87.67)
		let points = score(Some(Tier::One), 1, 100)?;

		assert_eq!(points.wr_value, 250);
		assert_eq!(points.reward, RankReward::WorldRecord(250));
		assert_eq!(points.total(), 275);

		Ok(())
	}

	#[test]
	fn tier_one_second_place() -> Result<()> {
		let points = score(Some(Tier::One), 2, 100)?;

		assert_eq!(points.reward, RankReward::Top10(200));
		assert_eq!(points.total(), 225);

		Ok(())
	}

	#[test]
	fn world_records_on_small_leaderboards() -> Result<()> {
		// 10 finishers keep every tier at its floor
		let table = [
			(Some(Tier::One), 25 + 250),
			(Some(Tier::Two), 50 + 500),
			(Some(Tier::Three), 100 + 750),
			(Some(Tier::Four), 200 + 1000),
			(Some(Tier::Five), 400 + 1250),
			(Some(Tier::Six), 600 + 1500),
			(Some(Tier::Seven), 800 + 1750),
			(Some(Tier::Eight), 1000 + 2000),
			(None, 13 + 25),
		];

		for (tier, total) in table {
			let points = score(tier, 1, 10)?;

			assert_eq!(points.total(), total, "{tier:?}");
			assert!(matches!(points.reward, RankReward::WorldRecord(_)), "{tier:?} rank 1 is a WR");
		}

		Ok(())
	}

	#[test]
	fn wr_value_floors() {
		let table = [
			(Some(Tier::One), 100, 250),
			(Some(Tier::Two), 10, 500),
			(Some(Tier::Three), 10, 750),
			(Some(Tier::Four), 10, 1000),
			(Some(Tier::Five), 100, 1250),
			(Some(Tier::Six), 100, 1500),
			(Some(Tier::Seven), 100, 1750),
			(Some(Tier::Eight), 1, 2000),
			(None, 1_000_000, 25),
		];

		for (tier, total_finishers, points) in table {
			assert_eq!(iwr_points(tier, total_finishers), points, "{tier:?} / {total_finishers}");
		}
	}

	#[test]
	fn wr_value_offsets() {
		let table = [
			// 1000 * 1.75 / 6 + 58.5 = 350.1666..
			(Some(Tier::One), 1000, 351),
			// 1000 * 2.8 / 5 + 82.15 = 642.15
			(Some(Tier::Two), 1000, 643),
			// 1000 * 3.5 / 4 = 875, past the floor, so the offset applies: 875 + 117
			(Some(Tier::Three), 1000, 992),
			// 2000 * 5.74 / 4 = 2870, + 164.25
			(Some(Tier::Four), 2000, 3035),
			(Some(Tier::Five), 1000, 1750 + 234),
			(Some(Tier::Six), 1000, 3500 + 328),
			(Some(Tier::Seven), 1000, 5250 + 420),
			(Some(Tier::Eight), 1000, 7500 + 560),
		];

		for (tier, total_finishers, points) in table {
			assert_eq!(iwr_points(tier, total_finishers), points, "{tier:?} / {total_finishers}");
		}
	}

	#[test]
	fn offset_only_applies_past_the_floor() {
		// 800 * 3.5 / 4 = 700 is below the floor; the offset would have lifted it past 750
		assert_eq!(iwr_points(Some(Tier::Three), 800), 750);

		// 200 * 14 / 4 = 700, same for tier 6
		assert_eq!(iwr_points(Some(Tier::Six), 200), 1500);
	}

	#[test]
	fn top10_shares() {
		let table = [
			(2, 201),  // 200.8
			(3, 189),  // 188.25
			(4, 176),  // 175.7
			(5, 164),  // 163.15
			(6, 151),  // 150.6
			(7, 139),  // 138.05
			(8, 126),  // 125.5
			(9, 113),  // 112.95
			(10, 101), // 100.4
		];

		for (rank, points) in table {
			assert_eq!(top10_points(251, rank), Some(points), "rank {rank}");
		}

		assert_eq!(top10_points(251, 1), None);
		assert_eq!(top10_points(251, 11), None);
	}

	#[test]
	fn top10_shares_round_up_like_floats() -> Result<()> {
		// 1500 * 0.55 is slightly above 825 in floating point
		let points = score(Some(Tier::Six), 7, 10)?;

		assert_eq!(points.wr_value, 1500);
		assert_eq!(points.reward, RankReward::Top10(826));

		Ok(())
	}

	#[test]
	fn group_rewards_decay() -> Result<()> {
		// 20 finishers: bands are 11-15, 16-20, 21-25, 26-30, 31-35
		let units = [63, 42, 28, 19, 13];

		assert_eq!(score(Some(Tier::One), 11, 20)?.group_units, units);
		assert_eq!(score(Some(Tier::One), 11, 20)?.reward, RankReward::Group { band: 1, points: 63 });
		assert_eq!(score(Some(Tier::One), 20, 20)?.reward, RankReward::Group { band: 2, points: 42 });

		Ok(())
	}

	#[test]
	fn past_the_last_band_only_earns_tier_points() -> Result<()> {
		// 1000 finishers: band 5 ends at rank 511
		let points = score(Some(Tier::Five), 512, 1000)?;

		assert_eq!(points.reward, RankReward::Unranked);
		assert_eq!(points.total(), 400);

		let points = score(Some(Tier::Five), 511, 1000)?;

		assert!(matches!(points.reward, RankReward::Group { band: 5, .. }), "rank 511 is in band 5");

		Ok(())
	}

	#[test]
	fn untiered_maps_use_fallbacks() -> Result<()> {
		let points = score(None, 1, 40)?;

		assert_eq!(points.tier_points, 13);
		assert_eq!(points.total(), 13 + 25);

		Ok(())
	}

	#[test]
	fn stages_only_pay_for_world_records() -> Result<()> {
		let config = PointsConfig { wrcp_points: 10 };
		let stage = |rank| StageCompletion { map: String::from("surf_forgotten"), stage: 2, rank };

		assert_eq!(score_stage(&stage(1), &config)?, RankPoints { points: 10, world_record: true });
		assert_eq!(score_stage(&stage(2), &config)?, RankPoints { points: 0, world_record: false });
		assert_eq!(
			score_stage(&stage(1), &PointsConfig::default())?,
			RankPoints { points: 0, world_record: true },
		);

		Ok(())
	}

	#[test]
	fn bonus_world_record() -> Result<()> {
		let bonus = BonusCompletion {
			map: String::from("surf_ski_2"),
			bonus: 1,
			rank: 1,
			total_finishers: 3_000,
		};

		assert_eq!(score_bonus(&bonus)?, RankPoints { points: 250, world_record: true });

		Ok(())
	}
}
