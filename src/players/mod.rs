//! Everything related to players.

use axum::routing::get;
use axum::Router;

use crate::State;

mod models;
pub use models::{Completions, StyleParams};

pub mod handlers;

/// Returns a router with routes for `/players`.
pub fn router(state: &'static State) -> Router {
	Router::new()
		.route("/:steam_id/points", get(handlers::points::get))
		.route("/:steam_id/completions", get(handlers::completions::get))
		.with_state(state)
}
