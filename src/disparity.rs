//! # Disparity maps
//!
//! This module provides the 8 bit disparity map consumed by the detector. Scene frames,
//! background references and the derived obstacle maps all share this type.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{GrayImage, Luma};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A per-pixel disparity map, larger values are closer to the camera rig.
#[derive(Debug, Clone, PartialEq)]
pub struct DisparityMap {
    data: GrayImage,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl DisparityMap {
    /// Create a new map of the given size with every disparity set to zero.
    pub fn new(width: u32, height: u32) -> Self {
        DisparityMap {
            data: GrayImage::new(width, height),
        }
    }

    pub fn from_luma(data: GrayImage) -> Self {
        DisparityMap { data }
    }

    /// Build a map from row-major floating point disparities.
    ///
    /// Values are clamped into `0..=255` and truncated. Returns `None` if `values` does not hold
    /// exactly `width * height` samples.
    pub fn from_f32(width: u32, height: u32, values: &[f32]) -> Option<Self> {
        if values.len() != width as usize * height as usize {
            return None;
        }

        let mut new = GrayImage::new(width, height);

        for (px, &disp) in new.pixels_mut().zip(values) {
            let mut val = disp;

            // NaN casts to zero
            if val < 0.0 {
                val = 0.0;
            }
            else if val > 255.0 {
                val = 255.0;
            }

            *px = Luma([val as u8]);
        }

        Some(DisparityMap { data: new })
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    /// True if the map holds no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.data.width() == 0 || self.data.height() == 0
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data.get_pixel(x, y)[0]
    }

    pub fn put(&mut self, x: u32, y: u32, val: u8) {
        self.data.put_pixel(x, y, Luma([val]))
    }

    /// Iterate over every disparity sample in row-major order.
    pub fn samples(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.pixels().map(|p| p[0])
    }

    /// Number of pixels with a non-zero disparity.
    pub fn count_nonzero(&self) -> usize {
        self.samples().filter(|&v| v > 0).count()
    }

    /// Borrow the underlying greyscale image, e.g. for display.
    pub fn to_luma(&self) -> &GrayImage {
        &self.data
    }

    pub fn into_luma(self) -> GrayImage {
        self.data
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
