//! Glue between the points engine and the SurfTimer database.

mod mysql;
pub use mysql::MySqlStore;
