//! The API's main application state.
//!
//! This is initialized once on startup, and then passed around the application by axum.

use derive_more::Debug;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use surftimer::PointsConfig;

use crate::points::MySqlStore;
use crate::Result;

/// The state as handlers extract it.
pub type AppState = axum::extract::State<&'static State>;

/// The main application state.
///
/// A `'static` reference to this is passed around the application.
#[derive(Debug)]
pub struct State {
	/// The API configuration.
	pub config: crate::Config,

	/// Connection pool to the backing database.
	#[debug(skip)]
	database: MySqlPool,
}

impl State {
	/// Connects to the database and leaks the resulting [`State`] on the heap.
	///
	/// **This function should only ever be called once; it leaks memory.**
	pub async fn new(config: crate::Config) -> Result<&'static Self> {
		let database = MySqlPoolOptions::new()
			.connect(config.database_url.as_str())
			.await?;

		Ok(Self::leak(config, database))
	}

	/// Wraps an existing pool.
	pub fn leak(config: crate::Config, database: MySqlPool) -> &'static Self {
		Box::leak(Box::new(Self { config, database }))
	}

	pub const fn points_config(&self) -> &PointsConfig {
		&self.config.points
	}

	/// The SurfTimer tables, as a source of records.
	pub fn store(&self) -> MySqlStore {
		MySqlStore::new(self.database.clone())
	}
}
