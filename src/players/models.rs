use serde::{Deserialize, Serialize};
use surftimer::points::PlayerCompletions;
use surftimer::{SteamID, Style};
use utoipa::{IntoParams, ToSchema};

/// Query parameters shared by the `/players/{steam_id}/*` routes.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StyleParams {
	/// The style to look at. Defaults to `normal`.
	#[serde(default)]
	#[param(value_type = Option<i32>)]
	pub style: Style,
}

/// Everything a player's points are calculated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Completions {
	/// The player's SteamID.
	pub steam_id: SteamID,

	/// The player's name in `style`.
	pub name: String,

	pub style: Style,

	/// The player's finished maps, stages and bonuses.
	#[serde(flatten)]
	pub completions: PlayerCompletions,
}
