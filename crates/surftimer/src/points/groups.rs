//! Percentile reward bands ("groups").
//!
//! Below the top 10 of every map, finishers are sorted into five bands. Each band covers a
//! fraction of the map's population (1/32, 1/16, 1/8, 1/4 and 1/2), measured from rank 11, and is
//! at least [`Groups::MIN_WIDTH`] ranks wide so small maps still have reachable bands.

use crate::{Error, Result};

/// One reward band, covering the ranks `bottom..=top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Band {
	/// 1 through 5; band 1 is the best one.
	pub number: u8,

	/// First rank inside the band.
	pub bottom: u32,

	/// Last rank inside the band.
	pub top: u32,
}

impl Band {
	#[inline]
	pub const fn contains(&self, rank: u32) -> bool {
		self.bottom <= rank && rank <= self.top
	}
}

/// The five reward bands of one leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Groups {
	bands: [Band; 5],
}

impl Groups {
	/// Rank at which band 1 starts; everything above it is the top 10.
	pub const FIRST_RANK: u32 = 11;

	/// Minimum distance between the first and last rank of a band.
	pub const MIN_WIDTH: u32 = 4;

	/// `(band number, denominator of the population fraction)`
	const FRACTIONS: [(u8, u32); 5] = [(1, 32), (2, 16), (3, 8), (4, 4), (5, 2)];

	/// Computes the bands for a leaderboard with `total_finishers` entries.
	///
	/// The upper edge of band `k` is `ceil(total_finishers * fraction_k + 11)`. All fractions
	/// are powers of two, so this is evaluated exactly in integers.
	pub fn new(total_finishers: u32) -> Result<Self> {
		if total_finishers == 0 {
			return Err(Error::precondition("cannot compute groups without finishers"));
		}

		let mut bottom = Self::FIRST_RANK;
		let bands = Self::FRACTIONS.map(|(number, denominator)| {
			let mut top = total_finishers
				.div_ceil(denominator)
				.saturating_add(Self::FIRST_RANK);

			if top < bottom.saturating_add(Self::MIN_WIDTH) {
				top = bottom.saturating_add(Self::MIN_WIDTH);
			}

			let band = Band { number, bottom, top };
			bottom = top.saturating_add(1);
			band
		});

		Ok(Self { bands })
	}

	#[inline]
	pub const fn bands(&self) -> &[Band; 5] {
		&self.bands
	}

	/// Returns the band containing `rank`, if any.
	pub fn band_of(&self, rank: u32) -> Option<&Band> {
		self.bands.iter().find(|band| band.contains(rank))
	}
}

#[cfg(test)]
mod tests {
	use color_eyre::Result;
	use pretty_assertions::assert_eq;

	use super::*;

	fn edges(groups: &Groups) -> Vec<(u32, u32)> {
		groups.bands().iter().map(|band| (band.bottom, band.top)).collect()
	}

	#[test]
	fn small_population_is_clamped_to_min_width() -> Result<()> {
		let groups = Groups::new(20)?;

		// ceil(20/32 + 11) = 12, which is only 1 rank past the bottom edge
		assert_eq!(edges(&groups), vec![(11, 15), (16, 20), (21, 25), (26, 30), (31, 35)]);

		Ok(())
	}

	#[test]
	fn large_population_follows_percentiles() -> Result<()> {
		let groups = Groups::new(1000)?;

		assert_eq!(edges(&groups), vec![
			(11, 43),
			(44, 74),
			(75, 136),
			(137, 261),
			(262, 511),
		]);

		Ok(())
	}

	#[test]
	fn bands_are_contiguous_and_wide_enough() -> Result<()> {
		for total_finishers in (1..=2_000).chain([10_000, 65_535, 1_000_000]) {
			let groups = Groups::new(total_finishers)?;
			let bands = groups.bands();

			assert_eq!(bands.first().map(|band| band.bottom), Some(Groups::FIRST_RANK));

			for band in bands {
				assert!(band.top - band.bottom >= Groups::MIN_WIDTH, "{band:?} too narrow");
			}

			for pair in bands.windows(2) {
				let [lower, upper] = pair else { unreachable!() };
				assert_eq!(lower.top + 1, upper.bottom, "gap or overlap for n={total_finishers}");
			}
		}

		Ok(())
	}

	#[test]
	fn same_population_same_bands() -> Result<()> {
		assert_eq!(Groups::new(377)?, Groups::new(377)?);

		Ok(())
	}

	#[test]
	fn finds_band_of_rank() -> Result<()> {
		let groups = Groups::new(20)?;

		assert_eq!(groups.band_of(10), None);
		assert_eq!(groups.band_of(11).map(|band| band.number), Some(1));
		assert_eq!(groups.band_of(16).map(|band| band.number), Some(2));
		assert_eq!(groups.band_of(35).map(|band| band.number), Some(5));
		assert_eq!(groups.band_of(36), None);

		Ok(())
	}

	#[test]
	fn empty_leaderboard_is_rejected() {
		assert!(matches!(Groups::new(0), Err(Error::PreconditionViolated { .. })));
	}
}
