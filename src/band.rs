//! # Closest band search
//!
//! Finds disparity bands in a shaped histogram. The primary search returns the topmost run of
//! non-empty bins, which corresponds to the object closest to the camera rig. Band peeling is an
//! alternative that walks up the histogram peak by peak, see [`peel_bands`].

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::debug;

use crate::bins::{BinMapper, BinRange, IntensityRange};
use crate::histogram::Histogram;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A disparity band identified in a histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectBand {
    pub bins: BinRange,
    pub intensities: IntensityRange,

    /// Summed histogram counts over `bins`.
    pub area: u32,

    /// Count-weighted mean disparity of the band.
    pub disparity: f32,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl ObjectBand {
    pub fn from_range(hist: &Histogram, bins: BinRange, mapper: &BinMapper) -> Self {
        Self {
            bins,
            intensities: mapper.range_to_intensity(bins),
            area: hist.area(bins),
            disparity: hist
                .mean_intensity(bins, mapper)
                .unwrap_or_else(|| mapper.bin_to_intensity(bins.lower)),
        }
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Find the topmost contiguous run of non-empty bins.
///
/// Returns `None` if every bin is empty. The returned range is inclusive, the upper bin is the
/// highest non-empty bin.
pub fn find_closest(hist: &Histogram) -> Option<BinRange> {
    let counts = hist.counts();

    // Upper boundary
    let upper = counts.iter().rposition(|&c| c > 0)?;

    // Lower boundary, the bin above the first empty one below the upper boundary
    let lower = counts[..=upper]
        .iter()
        .rposition(|&c| c == 0)
        .map(|empty| empty + 1)
        .unwrap_or(0);

    Some(BinRange::new(lower, upper))
}

/// Peel bands from the histogram in order of increasing disparity.
///
/// Each step takes the highest-count bin, widens it to its neighbourhood and measures the area
/// of that window. Peeling stops at the first band whose area is below `min_area`, otherwise the
/// band is recorded and every bin up to its upper edge is cleared before the next step. The last
/// band returned is the closest significant one.
pub fn peel_bands(hist: &Histogram, mapper: &BinMapper, min_area: u32) -> Vec<ObjectBand> {
    let mut hist = hist.clone();
    let mut bands = Vec::new();

    while let Some(peak) = hist.peak() {
        let bins = mapper.bin_to_neighbourhood(peak);
        let band = ObjectBand::from_range(&hist, bins, mapper);

        if band.area < min_area {
            debug!(
                "Band {}..={} has area {} below minimum {}, stopping",
                bins.lower, bins.upper, band.area, min_area
            );
            break;
        }

        debug!(
            "Peeled band {}..={} with area {} at disparity {:.2}",
            bins.lower, bins.upper, band.area, band.disparity
        );
        bands.push(band);
        hist.clear_below(bins.upper + 1);
    }

    bands
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
