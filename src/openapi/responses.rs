//! Response types that only exist for the OpenAPI document.

use utoipa::{IntoResponses, ToSchema};

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
#[derive(IntoResponses)]
#[response(status = OK)]
pub struct Ok<T: ToSchema<'static>>(#[to_schema] T);

#[allow(missing_docs)]
#[derive(IntoResponses)]
#[response(status = NO_CONTENT)]
pub struct NoContent;

#[allow(missing_docs)]
#[derive(IntoResponses)]
#[response(status = BAD_REQUEST)]
pub struct BadRequest;

#[allow(missing_docs)]
#[derive(IntoResponses)]
#[response(
	status = INTERNAL_SERVER_ERROR,
	description = "Something unexpected happened. This is a bug; please report it."
)]
pub struct InternalServerError;
