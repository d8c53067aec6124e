//! The points engine.
//!
//! A player's points are derived purely from what they finished: every map, bonus and stage
//! completion is scored on its own (see [`assign`]), and the results are summed into a
//! [`PointsBreakdown`] by [`calculate()`]. [`recalculate_roster()`] drives this for every ranked
//! player of a style, reading records from a [`RecordSource`] and handing results to a
//! [`PointsSink`].

pub mod assign;

pub mod completion;
pub use completion::{
	BonusCompletion,
	Category,
	Completion,
	MapCompletion,
	PlayerCompletions,
	StageCompletion,
};

pub mod groups;
pub use groups::{Band, Groups};

mod breakdown;
pub use breakdown::{calculate, PointsBreakdown};

mod source;
pub use source::{PointsSink, RankedPlayer, RecordSource, RosterSource};

mod roster;
pub use roster::{recalculate_roster, RecalculateOptions, RecalculationSummary, RosterError};

/// Tunables of the points formulas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointsConfig {
	/// Points for every stage world record. Stages are worth nothing by default.
	pub wrcp_points: u64,
}
