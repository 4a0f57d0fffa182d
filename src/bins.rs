//! # Bin ranges
//!
//! Conversions between histogram bin indices and disparity intensities.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::error::*;
use crate::params::Params;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Inclusive range of histogram bins, `lower <= upper` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub lower: usize,
    pub upper: usize,
}

/// Open intensity interval `(lower, upper)` selecting the pixels of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityRange {
    pub lower: f32,
    pub upper: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinMapper {
    bin_width: f32,
    hist_size: usize,
    left_bin_range: usize,
    right_bin_range: usize,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl BinRange {
    pub fn new(lower: usize, upper: usize) -> Self {
        assert!(lower <= upper, "bin range {}..={} is inverted", lower, upper);
        Self { lower, upper }
    }

    /// Number of bins covered.
    pub fn len(&self) -> usize {
        self.upper - self.lower + 1
    }

    pub fn contains(&self, bin: usize) -> bool {
        bin >= self.lower && bin <= self.upper
    }
}

impl IntensityRange {
    /// True if `val` lies strictly inside the range.
    pub fn contains(&self, val: f32) -> bool {
        val > self.lower && val < self.upper
    }
}

impl BinMapper {
    /// Build a mapper for the histogram described by `params`, which must be valid.
    pub fn new(params: &Params) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            bin_width: params.bin_width(),
            hist_size: params.hist_size,
            left_bin_range: params.left_bin_range,
            right_bin_range: params.right_bin_range,
        })
    }

    pub fn bin_width(&self) -> f32 {
        self.bin_width
    }

    pub fn hist_size(&self) -> usize {
        self.hist_size
    }

    /// Lower intensity edge of a bin.
    pub fn bin_to_intensity(&self, bin: usize) -> f32 {
        bin as f32 * self.bin_width
    }

    /// Window of bins around `bin`, clamped to the histogram.
    pub fn bin_to_neighbourhood(&self, bin: usize) -> BinRange {
        let lower = bin.saturating_sub(self.left_bin_range);
        let upper = bin
            .saturating_add(self.right_bin_range)
            .min(self.hist_size - 1);

        BinRange::new(lower.min(upper), upper)
    }

    /// Intensities selecting every pixel counted in `range`.
    ///
    /// The upper intensity is the top edge of the upper bin, i.e. the lower edge of the bin
    /// after it.
    pub fn range_to_intensity(&self, range: BinRange) -> IntensityRange {
        IntensityRange {
            lower: self.bin_to_intensity(range.lower),
            upper: self.bin_to_intensity(range.upper + 1),
        }
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
