use {std::result::Result as StdResult, thiserror::Error as ThisError};

pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, ThisError)]
pub enum Error {
	/// An invalid input was passed to a [`SteamID`](crate::SteamID) constructor.
	#[error("`{}` is not a valid SteamID.{}", input, match reason {
		None => String::new(),
		Some(reason) => format!(" ({reason})"),
	})]
	InvalidSteamID { input: String, reason: Option<String> },

	#[error("`{}` is not a valid Style.{}", input, match reason {
		None => String::new(),
		Some(reason) => format!(" ({reason})"),
	})]
	InvalidStyle { input: String, reason: Option<String> },

	#[error("`{}` is not a valid Tier.{}", input, match reason {
		None => String::new(),
		Some(reason) => format!(" ({reason})"),
	})]
	InvalidTier { input: String, reason: Option<String> },

	/// The points engine was handed a record that cannot exist, like a map nobody finished.
	#[error("precondition violated: {what}")]
	PreconditionViolated { what: String },
}

impl Error {
	pub(crate) fn precondition<S>(what: S) -> Self
	where
		S: Into<String>, {
		Self::PreconditionViolated { what: what.into() }
	}
}
