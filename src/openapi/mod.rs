//! Everything related to [OpenAPI].
//!
//! This project uses the [`utoipa`] crate for generating an OpenAPI document from code.
//! The [`Spec`] struct in this module lists out all the relevant types, routes, and other metadata
//! that will be included in the document.
//!
//! [OpenAPI]: https://spec.openapis.org/oas/latest.html

use derive_more::{Deref, DerefMut};
use itertools::Itertools;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod responses;

#[derive(Debug, Clone, Deref, DerefMut, OpenApi)]
#[openapi(
  info(
    title = "SurfTimer API",
    description = "Player points and the records they are calculated from.",
  ),
  paths(
    crate::players::handlers::points::get,
    crate::players::handlers::completions::get,
  ),
  components(
    schemas(
      surftimer::SteamID,
      surftimer::Style,
      surftimer::PointsBreakdown,
      surftimer::points::Category,
      surftimer::points::PlayerCompletions,
      surftimer::points::MapCompletion,
      surftimer::points::StageCompletion,
      surftimer::points::BonusCompletion,

      crate::players::Completions,
    ),
  ),
)]
#[allow(missing_docs)]
pub struct Spec(utoipa::openapi::OpenApi);

impl Spec {
	/// Creates a new [`Spec`].
	pub fn new() -> Self {
		Self(Self::openapi())
	}

	/// Returns an iterator over the registered API routes and their allowed HTTP methods.
	pub fn routes(&self) -> impl Iterator<Item = (&str, String)> {
		self.paths.paths.iter().map(|(path, handler)| {
			let methods = handler
				.operations
				.keys()
				.map(|method| format!("{method:?}").to_uppercase())
				.join(", ");

			(path.as_str(), methods)
		})
	}

	/// Creates a [`SwaggerUi`], which can be turned into an [`axum::Router`], that will serve
	/// a SwaggerUI web page and a JSON file representing this OpenAPI document.
	pub fn swagger_ui(self) -> SwaggerUi {
		SwaggerUi::new("/docs/swagger-ui").url("/docs/open-api.json", self.0)
	}
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;

	use super::*;

	#[test]
	fn lists_every_route() {
		let spec = Spec::new();
		let routes = spec.routes().map(|(path, _)| path).collect_vec();

		assert!(routes.contains(&"/players/{steam_id}/points"), "{routes:?}");
		assert!(routes.contains(&"/players/{steam_id}/completions"), "{routes:?}");
	}

	#[test]
	fn serializes() -> Result<()> {
		let json = Spec::new().to_pretty_json()?;

		assert!(json.contains("PointsBreakdown"), "schema is missing");

		Ok(())
	}
}
