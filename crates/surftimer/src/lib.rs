//! SurfTimer
//!
//! Core types shared between the API and the points daemon, and the points engine that turns a
//! player's finished maps, stages and bonuses into a leaderboard score.

mod error;
pub use error::{Error, Result};

pub mod steam_id;
pub use steam_id::SteamID;

pub mod style;
pub use style::Style;

pub mod tier;
pub use tier::Tier;

pub mod points;
pub use points::{PointsBreakdown, PointsConfig};

#[cfg(test)]
mod test_setup {
	#[ctor::ctor]
	fn test_setup() {
		color_eyre::install().expect("Failed to setup color-eyre.");
	}
}
