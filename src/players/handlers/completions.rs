//! Handlers for the `/players/{steam_id}/completions` route.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use surftimer::points::RecordSource;
use surftimer::SteamID;

use crate::openapi::responses;
use crate::players::{Completions, StyleParams};
use crate::state::AppState;
use crate::{Error, Result};

/// Fetch everything a player's points are calculated from.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/players/{steam_id}/completions",
  tag = "Players",
  params(
    ("steam_id" = SteamID, Path, description = "The player's SteamID"),
    StyleParams,
  ),
  responses(
    responses::Ok<Completions>,
    responses::NoContent,
    responses::BadRequest,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	state: AppState,
	path: Result<Path<SteamID>, PathRejection>,
	query: Result<Query<StyleParams>, QueryRejection>,
) -> Result<Json<Completions>> {
	let Path(steam_id) = path?;
	let Query(StyleParams { style }) = query?;
	let store = state.store();

	let name = store
		.player_name(steam_id, style)
		.await?
		.ok_or_else(|| Error::no_content())?;

	let completions = store.completions(steam_id, style).await?;

	if completions.is_empty() {
		tracing::debug!(%steam_id, %style, "player has not finished anything");
	}

	Ok(Json(Completions { steam_id, name, style, completions }))
}
