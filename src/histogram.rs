//! # Disparity histograms
//!
//! Count histograms over obstacle disparities, including the low-bin clearing and noise floor
//! shaping applied before the closest band is searched for.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::bins::{BinMapper, BinRange};
use crate::disparity::DisparityMap;
use crate::error::*;
use crate::params::Params;

#[cfg(feature = "statistics")]
use plotters::prelude::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Fixed-size count histogram of disparity intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: Vec<u32>,

    /// Bins below this index are already known to be zero.
    cleared: usize,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Histogram {
    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self { counts, cleared: 0 }
    }

    /// Compute the histogram of an obstacle map.
    ///
    /// `params.hist_size` uniform bins span `[0, params.number_values)`, samples outside the
    /// range are not counted. Bins `[0, params.clear_offset)` are then cleared, removing the
    /// spike from the zeroed background pixels.
    pub fn compute(obstacles: &DisparityMap, params: &Params) -> Result<Self> {
        if obstacles.is_empty() {
            return Err(Error::EmptyMap);
        }
        params.validate()?;

        let mut counts = vec![0u32; params.hist_size];
        let scale = params.hist_size as f32 / params.number_values as f32;

        for val in obstacles.samples() {
            if u16::from(val) >= params.number_values {
                continue;
            }

            let bin = ((val as f32 * scale) as usize).min(params.hist_size - 1);
            counts[bin] += 1;
        }

        let mut hist = Self::from_counts(counts);
        hist.clear_below(params.clear_offset);

        Ok(hist)
    }

    /// Zero bins `[0, offset)`.
    ///
    /// Bins cleared by an earlier call are not touched again.
    pub fn clear_below(&mut self, offset: usize) {
        let offset = offset.min(self.counts.len());

        for count in self.counts.iter_mut().take(offset).skip(self.cleared) {
            *count = 0;
        }

        self.cleared = self.cleared.max(offset);
    }

    /// Suppress bins whose count does not exceed `min_base`.
    ///
    /// Surviving bins keep their original count rather than the count less the base.
    pub fn shape(&self, min_base: u32) -> Self {
        let counts = self
            .counts
            .iter()
            .map(|&c| if c.saturating_sub(min_base) > 0 { c } else { 0 })
            .collect();

        Self {
            counts,
            cleared: self.cleared,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// # Panics
    ///
    /// Panics if `bin` is not below `self.len()`.
    pub fn get(&self, bin: usize) -> u32 {
        self.counts[bin]
    }

    /// Total count of all bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Index of the bin with the highest count, the lowest index wins ties.
    pub fn peak(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;

        for (idx, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, c)) if c >= count => {}
                _ => best = Some((idx, count)),
            }
        }

        best.map(|(idx, _)| idx)
    }

    /// Area of an object without spatial information, i.e. the summed counts of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range.upper` is not below `self.len()`.
    pub fn area(&self, range: BinRange) -> u32 {
        self.counts[range.lower..=range.upper].iter().sum()
    }

    /// Count-weighted mean intensity of the bins in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range.upper` is not below `self.len()`. The mapper is only used to convert bin
    /// indices, so one built for a different histogram size gives meaningless intensities.
    pub fn mean_intensity(&self, range: BinRange, mapper: &BinMapper) -> Option<f32> {
        let mut weighted = 0.0f64;
        let mut total = 0u64;

        for bin in range.lower..=range.upper {
            let count = self.counts[bin];
            weighted += f64::from(count) * f64::from(mapper.bin_to_intensity(bin));
            total += u64::from(count);
        }

        if total == 0 {
            return None;
        }

        Some((weighted / total as f64) as f32)
    }

    /// Plot the histogram as a line chart into a PNG at `path`.
    #[cfg(feature = "statistics")]
    pub fn plot<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let max = self.counts.iter().copied().max().unwrap_or(0).max(1);

        let area = BitMapBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
        area.fill(&WHITE)
            .map_err(|e| Error::Plot(format!("{:?}", e)))?;

        let mut chart = ChartBuilder::on(&area)
            .caption("Obstacle disparity histogram", ("sans-serif", 20).into_font())
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_ranged(0..self.counts.len(), 0..max)
            .map_err(|e| Error::Plot(format!("{:?}", e)))?;

        chart
            .configure_mesh()
            .draw()
            .map_err(|e| Error::Plot(format!("{:?}", e)))?;

        chart
            .draw_series(LineSeries::new(
                self.counts.iter().copied().enumerate(),
                &BLUE,
            ))
            .map_err(|e| Error::Plot(format!("{:?}", e)))?;

        Ok(())
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
