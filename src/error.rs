//! Runtime errors.
//!
//! This module exposes the [`Error`] type that is used across the code base for bubbling up
//! errors. Specific error cases have dedicated constructors, see the public methods on [`Error`].
//!
//! [`Error`] implements [`IntoResponse`], which means it can be returned from HTTP handlers.
//!
//! [`Error`]: struct@Error

use std::fmt::{self, Display, Formatter};
use std::panic::Location;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Type alias for a [`Result<T, E>`] with its `E` parameter set to [`Error`].
///
/// [`Result`]: std::result::Result
/// [`Error`]: struct@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The API's core error type.
///
/// Carries the kind of error that occurred and where it was created.
#[derive(Debug, Error)]
pub struct Error {
	/// The kind of error that occurred.
	///
	/// This determines the HTTP status code and the message of the response body.
	kind: ErrorKind,

	/// The source code location of where the error occurred.
	location: Location<'static>,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.location, self.kind)
	}
}

/// The different kinds of errors that can occur at runtime.
#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Error)]
enum ErrorKind {
	#[error("no content")]
	NoContent,

	#[cfg_attr(test, error("database error: {0}"))]
	#[cfg_attr(not(test), error("database error"))]
	Database(#[from] sqlx::Error),

	#[error("failed to calculate points")]
	Points(#[from] surftimer::Error),

	#[error(transparent)]
	Path(#[from] PathRejection),

	#[error(transparent)]
	Query(#[from] QueryRejection),
}

impl Error {
	/// Creates a new [`Error`] of the given [`ErrorKind`].
	///
	/// [`Error`]: struct@Error
	#[track_caller]
	fn new<E>(kind: E) -> Self
	where
		E: Into<ErrorKind>,
	{
		Self { kind: kind.into(), location: *Location::caller() }
	}

	/// A generic `204 No Content` error.
	///
	/// Returned by `GET` handlers that would otherwise respond with an empty body.
	#[track_caller]
	pub(crate) fn no_content() -> Self {
		Self::new(ErrorKind::NoContent)
	}
}

impl IntoResponse for Error {
	#[track_caller]
	fn into_response(self) -> Response {
		use ErrorKind as E;

		let message = self.kind.to_string();
		let status = match self.kind {
			E::NoContent => StatusCode::NO_CONTENT,
			E::Query(_) => StatusCode::BAD_REQUEST,
			E::Path(ref rejection) => rejection.status(),
			E::Database(_) | E::Points(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};

		if status == StatusCode::NO_CONTENT {
			return status.into_response();
		}

		if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error!(?self, "internal server error occurred");
		} else {
			tracing::debug! {
				location = %self.location,
				kind = ?self.kind,
				error_message = %message,
				"returning error from request handler"
			};
		}

		(status, Json(json!({ "message": message }))).into_response()
	}
}

impl From<sqlx::Error> for Error {
	#[track_caller]
	fn from(error: sqlx::Error) -> Self {
		Self::new(error)
	}
}

impl From<surftimer::Error> for Error {
	#[track_caller]
	fn from(error: surftimer::Error) -> Self {
		Self::new(error)
	}
}

impl From<PathRejection> for Error {
	#[track_caller]
	fn from(rejection: PathRejection) -> Self {
		Self::new(rejection)
	}
}

impl From<QueryRejection> for Error {
	#[track_caller]
	fn from(rejection: QueryRejection) -> Self {
		Self::new(rejection)
	}
}
