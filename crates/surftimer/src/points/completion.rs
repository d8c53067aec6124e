//! The records the points engine consumes.
//!
//! Every record is one finished item (a map, a stage of a map, or a bonus of a map) together with
//! the player's position on that item's leaderboard. Ranks use competition ranking: players with
//! identical times share the better rank, and the next rank is skipped ("1224").

use std::fmt::Display;

use crate::{Error, Result, Tier};

/// The kind of item a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum Category {
	Map,
	Stage,
	Bonus,
}

impl Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::Map => "map",
			Self::Stage => "stage",
			Self::Bonus => "bonus",
		})
	}
}

/// Shared shape of all completion records.
pub trait Completion {
	/// Which rule set scores this record.
	const CATEGORY: Category;

	/// 1-based position among all completions of the same item.
	fn rank(&self) -> u32;

	/// How many distinct players finished the same item, if the record source knows.
	fn total_finishers(&self) -> Option<u32>;

	/// Checks `1 <= rank <= total_finishers`.
	///
	/// Records that fail this check cannot come out of a consistent leaderboard; scoring them
	/// anyway would silently skew somebody's points.
	fn validate(&self) -> Result<()> {
		let rank = self.rank();

		if rank == 0 {
			return Err(Error::precondition(format!("{} completion with rank 0", Self::CATEGORY)));
		}

		match self.total_finishers() {
			Some(0) => Err(Error::precondition(format!(
				"{} completion on an item with 0 finishers",
				Self::CATEGORY,
			))),
			Some(total) if rank > total => Err(Error::precondition(format!(
				"{} completion ranked {rank} out of {total}",
				Self::CATEGORY,
			))),
			Some(_) | None => Ok(()),
		}
	}
}

/// A finished map (main course).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct MapCompletion {
	/// The map's name.
	pub map: String,

	/// The player's rank on the map.
	pub rank: u32,

	/// How many players finished the map in the same style.
	pub total_finishers: u32,

	/// The map's tier, `None` if it was never rated.
	///
	/// Raw values outside of `1..=8` deserialize as `None`.
	#[cfg_attr(
		feature = "serde",
		serde(default, deserialize_with = "crate::tier::serde_impls::deserialize_raw")
	)]
	#[cfg_attr(feature = "utoipa", schema(value_type = Option<u8>, minimum = 1, maximum = 8))]
	pub tier: Option<Tier>,
}

impl Completion for MapCompletion {
	const CATEGORY: Category = Category::Map;

	fn rank(&self) -> u32 {
		self.rank
	}

	fn total_finishers(&self) -> Option<u32> {
		Some(self.total_finishers)
	}
}

/// A finished stage of a staged map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct StageCompletion {
	/// The map's name.
	pub map: String,

	/// The stage number.
	pub stage: u32,

	/// The player's rank on this stage.
	pub rank: u32,
}

impl Completion for StageCompletion {
	const CATEGORY: Category = Category::Stage;

	fn rank(&self) -> u32 {
		self.rank
	}

	fn total_finishers(&self) -> Option<u32> {
		None
	}
}

/// A finished bonus route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct BonusCompletion {
	/// The map's name.
	pub map: String,

	/// The bonus number (the zone group it lives in).
	pub bonus: u32,

	/// The player's rank on this bonus.
	pub rank: u32,

	/// How many players finished this bonus in the same style.
	pub total_finishers: u32,
}

impl Completion for BonusCompletion {
	const CATEGORY: Category = Category::Bonus;

	fn rank(&self) -> u32 {
		self.rank
	}

	fn total_finishers(&self) -> Option<u32> {
		Some(self.total_finishers)
	}
}

/// Everything one player has finished in one style.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct PlayerCompletions {
	pub maps: Vec<MapCompletion>,
	pub stages: Vec<StageCompletion>,
	pub bonuses: Vec<BonusCompletion>,
}

impl PlayerCompletions {
	/// Returns `true` if the player has not finished anything.
	pub fn is_empty(&self) -> bool {
		self.maps.is_empty() && self.stages.is_empty() && self.bonuses.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn map(rank: u32, total_finishers: u32) -> MapCompletion {
		MapCompletion { map: String::from("surf_utopia_v3"), rank, total_finishers, tier: None }
	}

	#[test]
	fn accepts_consistent_records() {
		assert!(map(1, 1).validate().is_ok());
		assert!(map(57, 57).validate().is_ok());
		assert!(StageCompletion { map: String::from("surf_kitsune"), stage: 3, rank: 9 }
			.validate()
			.is_ok());
	}

	#[test]
	fn rejects_impossible_records() {
		assert!(matches!(map(1, 0).validate(), Err(Error::PreconditionViolated { .. })));
		assert!(matches!(map(0, 10).validate(), Err(Error::PreconditionViolated { .. })));
		assert!(matches!(map(11, 10).validate(), Err(Error::PreconditionViolated { .. })));

		let bonus = BonusCompletion {
			map: String::from("surf_beginner"),
			bonus: 1,
			rank: 3,
			total_finishers: 2,
		};

		assert!(bonus.validate().is_err());
	}

	#[cfg(feature = "serde")]
	#[test]
	fn unknown_tiers_deserialize_as_untiered() -> color_eyre::Result<()> {
		use pretty_assertions::assert_eq;

		let parse = |tier: &str| {
			serde_json::from_str::<MapCompletion>(&format!(
				r#"{{ "map": "surf_mesa", "rank": 1, "total_finishers": 3{tier} }}"#
			))
		};

		assert_eq!(parse(r#", "tier": 4"#)?.tier, Some(Tier::Four));
		assert_eq!(parse(r#", "tier": 0"#)?.tier, None);
		assert_eq!(parse(r#", "tier": 9"#)?.tier, None);
		assert_eq!(parse(r#", "tier": -1"#)?.tier, None);
		assert_eq!(parse(r#", "tier": null"#)?.tier, None);
		assert_eq!(parse("")?.tier, None);

		Ok(())
	}
}
