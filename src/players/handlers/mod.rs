//! HTTP handlers for the `/players/{steam_id}` routes.

pub mod completions;
pub mod points;
