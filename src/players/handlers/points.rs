//! Handlers for the `/players/{steam_id}/points` route.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use surftimer::points::{self, RecordSource};
use surftimer::{PointsBreakdown, SteamID};

use crate::openapi::responses;
use crate::players::StyleParams;
use crate::state::AppState;
use crate::{Error, Result};

/// Recalculate a player's points.
///
/// The result is calculated from the player's current records and is not stored anywhere.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/players/{steam_id}/points",
  tag = "Players",
  params(
    ("steam_id" = SteamID, Path, description = "The player's SteamID"),
    StyleParams,
  ),
  responses(
    responses::Ok<PointsBreakdown>,
    responses::NoContent,
    responses::BadRequest,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	state: AppState,
	path: Result<Path<SteamID>, PathRejection>,
	query: Result<Query<StyleParams>, QueryRejection>,
) -> Result<Json<PointsBreakdown>> {
	let Path(steam_id) = path?;
	let Query(StyleParams { style }) = query?;
	let store = state.store();

	let name = store
		.player_name(steam_id, style)
		.await?
		.ok_or_else(|| Error::no_content())?;

	let completions = store.completions(steam_id, style).await?;
	let breakdown = points::calculate(&name, &completions, state.points_config())?;

	Ok(Json(breakdown))
}
