use {
	crate::{Error, Result},
	lazy_regex::{regex, Lazy, Regex},
	std::{fmt::Display, str::FromStr},
};

/// A regex to match [`SteamID`]s in the format of `STEAM_1:1:161178172`.
pub static STANDARD_REGEX: &Lazy<Regex> = regex!(r"^STEAM_[01]:([01]):(\d+)$");

/// A regex to match [`SteamID`]s in the format of `U:1:322356345` or `[U:1:322356345]`.
pub static STEAM3_ID_REGEX: &Lazy<Regex> = regex!(r"^\[?U:1:(\d+)\]?$");

/// A Steam account, identified by its 32-bit account ID.
///
/// SurfTimer keys every player table by the `STEAM_1:Y:Z` rendering of this ID, which is what
/// [`Display`] produces.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "utoipa", schema(value_type = String, example = "STEAM_1:1:161178172"))]
pub struct SteamID(u32);

impl SteamID {
	/// Offset between a 64-bit SteamID and the 32-bit account ID of an individual account.
	pub const MAGIC_OFFSET: u64 = 76561197960265728_u64;

	pub const MIN: u64 = Self::MAGIC_OFFSET + 1;
	pub const MAX: u64 = Self::MAGIC_OFFSET + u32::MAX as u64;
}

macro_rules! invalid {
	($input:expr) => {
		return Err($crate::Error::InvalidSteamID {
			input: $input.to_string(),
			reason: None,
		})
	};

	($input:expr, $($t:tt)*) => {
		return Err($crate::Error::InvalidSteamID {
			input: $input.to_string(),
			reason: Some(format!($($t)*)),
		})
	};
}

impl SteamID {
	/// Parses any of the formats players and game servers send us.
	pub fn new<S>(input: S) -> Result<Self>
	where
		S: AsRef<str>, {
		let input = input.as_ref();

		if STANDARD_REGEX.is_match(input) {
			Self::from_standard(input)
		} else if STEAM3_ID_REGEX.is_match(input) {
			Self::from_id3(input)
		} else if let Ok(int) = input.parse::<u64>() {
			Self::try_from(int)
		} else {
			invalid!(input);
		}
	}

	#[inline]
	pub const fn as_u32(&self) -> u32 {
		self.0
	}

	#[inline]
	pub const fn as_u64(&self) -> u64 {
		self.0 as u64 + Self::MAGIC_OFFSET
	}

	/// The `Y` part of `STEAM_X:Y:Z`.
	#[inline]
	pub const fn y_bit(&self) -> u32 {
		self.0 & 1
	}

	/// The `Z` part of `STEAM_X:Y:Z`.
	#[inline]
	pub const fn account_number(&self) -> u32 {
		self.0 >> 1
	}

	pub fn from_standard<S>(input: S) -> Result<Self>
	where
		S: AsRef<str>, {
		let input = input.as_ref();

		let Some(captures) = STANDARD_REGEX.captures(input) else {
			invalid!(input, "does not match \"standard\" regex");
		};

		let (Some(y_bit), Some(account_number)) = (captures.get(1), captures.get(2)) else {
			invalid!(input);
		};

		let y_bit = u64::from(y_bit.as_str() == "1");

		let Ok(account_number) = account_number.as_str().parse::<u64>() else {
			invalid!(input, "too large");
		};

		let Some(id32) = account_number
			.checked_mul(2)
			.and_then(|doubled| doubled.checked_add(y_bit))
			.and_then(|id32| u32::try_from(id32).ok())
		else {
			invalid!(input, "too large");
		};

		Self::try_from(id32)
	}

	pub fn from_id3<S>(input: S) -> Result<Self>
	where
		S: AsRef<str>, {
		let input = input.as_ref();

		let Some(id32) = STEAM3_ID_REGEX
			.captures(input)
			.and_then(|captures| captures.get(1))
		else {
			invalid!(input, "does not match Steam3ID regex");
		};

		let Ok(id32) = id32.as_str().parse::<u32>() else {
			invalid!(input, "too large");
		};

		Self::try_from(id32)
	}
}

impl Display for SteamID {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "STEAM_1:{}:{}", self.y_bit(), self.account_number())
	}
}

impl TryFrom<u32> for SteamID {
	type Error = Error;

	fn try_from(id32: u32) -> Result<Self> {
		if id32 == 0 {
			invalid!(id32, "is 0");
		}

		Ok(Self(id32))
	}
}

impl TryFrom<u64> for SteamID {
	type Error = Error;

	fn try_from(value: u64) -> Result<Self> {
		if let Ok(id32) = u32::try_from(value) {
			return Self::try_from(id32);
		}

		if !(Self::MIN..=Self::MAX).contains(&value) {
			invalid!(value, "out of range");
		}

		match u32::try_from(value - Self::MAGIC_OFFSET) {
			Ok(id32) => Self::try_from(id32),
			Err(_) => invalid!(value, "out of range"),
		}
	}
}

impl FromStr for SteamID {
	type Err = Error;

	fn from_str(input: &str) -> Result<Self> {
		Self::new(input)
	}
}

#[cfg(feature = "serde")]
mod serde_impls {
	use {
		super::SteamID,
		serde::{Deserialize, Deserializer, Serialize, Serializer},
	};

	impl Serialize for SteamID {
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer, {
			self.to_string().serialize(serializer)
		}
	}

	impl<'de> Deserialize<'de> for SteamID {
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>, {
			#[derive(Deserialize)]
			#[serde(untagged)]
			enum Helper {
				U64(u64),
				Str(String),
			}

			match Helper::deserialize(deserializer)? {
				Helper::U64(value) => SteamID::try_from(value),
				Helper::Str(value) => SteamID::new(value),
			}
			.map_err(serde::de::Error::custom)
		}
	}
}
