//! # Object masks
//!
//! Spatial localisation of a disparity band: the pixels of the obstacle map inside the band's
//! intensity range, eroded to drop thin noise.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use imageproc::rect::Rect;

use crate::bins::IntensityRange;
use crate::disparity::DisparityMap;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Value of a set pixel in the mask image.
pub const MASK_SET: u8 = 255;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Binary mask aligned with the input frame, set pixels are `MASK_SET` and the rest zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMask {
    data: GrayImage,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl ObjectMask {
    /// Extract the mask of the obstacle pixels within `range`.
    ///
    /// Pixels strictly inside the range are selected, then the selection is eroded by
    /// `erode_iterations` passes of a 3x3 square element. Pixels outside the image never erode
    /// their neighbours.
    pub fn extract(obstacles: &DisparityMap, range: IntensityRange, erode_iterations: u8) -> Self {
        let mut band = GrayImage::new(obstacles.width(), obstacles.height());

        for (x, y, px) in band.enumerate_pixels_mut() {
            if range.contains(obstacles.get(x, y) as f32) {
                *px = Luma([MASK_SET]);
            }
        }

        // Iterating a 3x3 erosion k times equals one erosion by a (2k+1) square, which is the
        // L-infinity ball of radius k.
        let data = morphology::erode(&band, Norm::LInf, erode_iterations);

        Self { data }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.data.dimensions()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.data.get_pixel(x, y)[0] > 0
    }

    /// Number of set pixels.
    pub fn area(&self) -> usize {
        self.data.pixels().filter(|p| p[0] > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Smallest rectangle enclosing every set pixel, `None` for an empty mask.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;

        for (x, y, px) in self.data.enumerate_pixels() {
            if px[0] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }

        bounds.map(|(x0, y0, x1, y1)| {
            Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0 + 1, y1 - y0 + 1)
        })
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.data
    }

    pub fn into_image(self) -> GrayImage {
        self.data
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
