//! # Detection parameters
//!
//! Fixed configuration of an [`ObjectDetection`](crate::detection::ObjectDetection). Parameters
//! can be built in code, starting from `Default`, or loaded from a JSON file.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Minimum scene minus background difference for a pixel to count as an obstacle.
    pub threshold: u8,

    /// Upper (exclusive) bound of the histogram's intensity range.
    pub number_values: u16,

    /// Number of histogram bins.
    pub hist_size: usize,

    /// Bins with a count at or below this value are treated as noise.
    pub min_base: u32,

    /// Neighbourhood radius below a peak bin.
    pub left_bin_range: usize,

    /// Neighbourhood radius above a peak bin.
    pub right_bin_range: usize,

    /// Bins `[0, clear_offset)` are zeroed straight after the histogram is computed.
    pub clear_offset: usize,

    /// Number of 3x3 erosion passes applied to the object mask.
    pub erode_iterations: u8,

    /// Minimum histogram area of a band accepted while peeling bands.
    pub min_area: u32,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            threshold: 50,
            number_values: 255,
            hist_size: 256,
            min_base: 2,
            left_bin_range: 3,
            right_bin_range: 3,
            clear_offset: 1,
            erode_iterations: 4,
            min_area: 100,
        }
    }
}

impl Params {
    /// Load parameters from a JSON file, missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&data)?;
        params.validate()?;

        Ok(params)
    }

    /// Check that the parameters describe a usable histogram.
    pub fn validate(&self) -> Result<()> {
        if self.hist_size == 0 {
            return Err(Error::InvalidParams("hist_size must be non-zero".into()));
        }
        if self.number_values == 0 {
            return Err(Error::InvalidParams("number_values must be non-zero".into()));
        }
        // Samples are 8 bit, any wider range only adds bins that can never be hit
        if self.number_values > 256 {
            return Err(Error::InvalidParams(format!(
                "number_values must be at most 256, got {}",
                self.number_values
            )));
        }
        if self.clear_offset > self.hist_size {
            return Err(Error::InvalidParams(format!(
                "clear_offset {} exceeds hist_size {}",
                self.clear_offset, self.hist_size
            )));
        }

        Ok(())
    }

    /// Width of a single histogram bin in intensity units.
    pub fn bin_width(&self) -> f32 {
        self.number_values as f32 / self.hist_size as f32
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = Params::default();
        assert!(params.validate().is_ok());
        assert!((params.bin_width() - 255.0 / 256.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: Params = serde_json::from_str(r#"{ "threshold": 30, "min_base": 5 }"#)
            .expect("valid json");
        assert_eq!(params.threshold, 30);
        assert_eq!(params.min_base, 5);
        assert_eq!(params.hist_size, 256);
        assert_eq!(params.erode_iterations, 4);
    }

    #[test]
    fn rejects_degenerate_histograms() {
        let zero_bins = Params { hist_size: 0, ..Default::default() };
        assert!(matches!(zero_bins.validate(), Err(Error::InvalidParams(_))));

        let wide = Params { number_values: 1024, ..Default::default() };
        assert!(matches!(wide.validate(), Err(Error::InvalidParams(_))));

        let over_cleared = Params { hist_size: 4, clear_offset: 5, ..Default::default() };
        assert!(matches!(over_cleared.validate(), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = Params::from_json_file("does/not/exist.json");
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
