/// Difficulty rating of a map.
///
/// Maps that were never rated have no tier at all; they are represented as `Option<Tier>` and
/// scored with their own fallback values.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
	One = 1,
	Two = 2,
	Three = 3,
	Four = 4,
	Five = 5,
	Six = 6,
	Seven = 7,
	Eight = 8,
}

impl Tier {
	pub const ALL: [Self; 8] = [
		Self::One,
		Self::Two,
		Self::Three,
		Self::Four,
		Self::Five,
		Self::Six,
		Self::Seven,
		Self::Eight,
	];

	/// Interprets a raw `ck_maptier.tier` value.
	///
	/// `NULL`, `0` and anything outside of `1..=8` mean the map is untiered.
	pub fn from_raw<T>(raw: Option<T>) -> Option<Self>
	where
		Self: TryFrom<T>, {
		raw.and_then(|raw| Self::try_from(raw).ok())
	}

	#[inline]
	pub const fn as_u8(&self) -> u8 {
		*self as u8
	}
}

macro_rules! try_from {
	([$($t:ty),+]) => {
		$(impl TryFrom<$t> for Tier {
			type Error = $crate::Error;

			fn try_from(value: $t) -> $crate::Result<Self> {
				match value {
					1 => Ok(Self::One),
					2 => Ok(Self::Two),
					3 => Ok(Self::Three),
					4 => Ok(Self::Four),
					5 => Ok(Self::Five),
					6 => Ok(Self::Six),
					7 => Ok(Self::Seven),
					8 => Ok(Self::Eight),
					_ => Err($crate::Error::InvalidTier {
						input: value.to_string(),
						reason: Some(String::from("tiers range from 1 to 8")),
					}),
				}
			}
		})+
	};
}

try_from!([u8, u16, u32, u64, usize, i8, i16, i32, i64, isize]);

#[cfg(feature = "serde")]
pub(crate) mod serde_impls {
	use {
		super::Tier,
		serde::{Deserialize, Deserializer, Serialize, Serializer},
	};

	impl Serialize for Tier {
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer, {
			self.as_u8().serialize(serializer)
		}
	}

	/// Deserializes an optional raw tier the same way [`Tier::from_raw()`] interprets it.
	pub(crate) fn deserialize_raw<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
	where
		D: Deserializer<'de>, {
		Option::<i64>::deserialize(deserializer).map(Tier::from_raw)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn raw_values_outside_the_scale_are_untiered() {
		assert_eq!(Tier::from_raw(Some(3_i32)), Some(Tier::Three));
		assert_eq!(Tier::from_raw(Some(8_i32)), Some(Tier::Eight));
		assert_eq!(Tier::from_raw(Some(0_i32)), None);
		assert_eq!(Tier::from_raw(Some(9_i32)), None);
		assert_eq!(Tier::from_raw(Some(-1_i32)), None);
		assert_eq!(Tier::from_raw(None::<i32>), None);
	}
}
