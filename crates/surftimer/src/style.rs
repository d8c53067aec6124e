use std::fmt::Display;
use std::str::FromStr;

use crate::{Error, Result};

/// A movement style.
///
/// Every style has its own leaderboards and its own points. The points engine never interprets
/// the value, so styles we don't know about are carried through verbatim.
#[repr(transparent)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "utoipa", schema(value_type = i32, example = 0))]
pub struct Style(pub i32);

impl Style {
	pub const NORMAL: Self = Self(0);
	pub const SIDEWAYS: Self = Self(1);
	pub const HALF_SIDEWAYS: Self = Self(2);
	pub const BACKWARDS: Self = Self(3);
	pub const LOW_GRAVITY: Self = Self(4);
	pub const SLOW_MOTION: Self = Self(5);
	pub const FAST_FORWARD: Self = Self(6);
	pub const FREESTYLE: Self = Self(7);

	/// The raw style ID as stored in the database.
	#[inline]
	pub const fn id(&self) -> i32 {
		self.0
	}

	/// Formats the style in a standardized way, if it is one we know about.
	pub const fn api(&self) -> Option<&'static str> {
		Some(match self.0 {
			0 => "normal",
			1 => "sideways",
			2 => "half_sideways",
			3 => "backwards",
			4 => "low_gravity",
			5 => "slow_motion",
			6 => "fast_forward",
			7 => "freestyle",
			_ => return None,
		})
	}
}

impl Display for Style {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.api() {
			Some(name) => f.write_str(name),
			None => write!(f, "style#{}", self.0),
		}
	}
}

impl From<i32> for Style {
	#[inline]
	fn from(value: i32) -> Self {
		Self(value)
	}
}

impl From<Style> for i32 {
	#[inline]
	fn from(Style(value): Style) -> Self {
		value
	}
}

impl FromStr for Style {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self> {
		if let Ok(id) = value.parse::<i32>() {
			return Ok(Self(id));
		}

		(0..=7)
			.map(Self)
			.find(|style| {
				style.api().is_some_and(|name| {
					name.eq_ignore_ascii_case(value)
						|| name.replace('_', "-").eq_ignore_ascii_case(value)
				})
			})
			.ok_or_else(|| Error::InvalidStyle { input: value.to_owned(), reason: None })
	}
}

#[cfg(feature = "serde")]
mod serde_impls {
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::Style;

	impl Serialize for Style {
		/// Styles are always serialized as their ID, which is what game servers send us.
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			self.0.serialize(serializer)
		}
	}

	impl<'de> Deserialize<'de> for Style {
		/// Accepts both the numeric ID and the name of a known style.
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			#[derive(Deserialize)]
			#[serde(untagged)]
			enum Helper {
				I32(i32),
				Str(String),
			}

			match <Helper as Deserialize<'de>>::deserialize(deserializer)? {
				Helper::I32(value) => Ok(Style(value)),
				Helper::Str(value) => value.parse().map_err(serde::de::Error::custom),
			}
		}
	}
}
