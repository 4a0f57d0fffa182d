//! # Background model
//!
//! Separates obstacle pixels from the empty-scene background.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{GrayImage, Luma};
use log::debug;

use crate::disparity::DisparityMap;
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Reference disparity of the empty scene plus the significance threshold.
#[derive(Debug, Clone)]
pub struct BackgroundModel {
    background: DisparityMap,
    threshold: u8,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl BackgroundModel {
    pub fn new(background: DisparityMap, threshold: u8) -> Result<Self> {
        if background.is_empty() {
            return Err(Error::EmptyMap);
        }

        Ok(Self {
            background,
            threshold,
        })
    }

    pub fn background(&self) -> &DisparityMap {
        &self.background
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Compute the obstacle map of a scene.
    ///
    /// A pixel keeps its scene disparity if `scene - background` (saturating at zero) exceeds
    /// the threshold, every other pixel becomes zero.
    pub fn obstacles(&self, scene: &DisparityMap) -> Result<DisparityMap> {
        if scene.is_empty() {
            return Err(Error::EmptyMap);
        }
        if scene.dimensions() != self.background.dimensions() {
            return Err(Error::DimensionMismatch {
                scene: scene.dimensions(),
                background: self.background.dimensions(),
            });
        }

        let bg = self.background.to_luma();
        let mut obstacles = GrayImage::new(scene.width(), scene.height());

        for (x, y, px) in obstacles.enumerate_pixels_mut() {
            let disp = scene.get(x, y);
            let diff = disp.saturating_sub(bg.get_pixel(x, y)[0]);

            if diff > self.threshold {
                *px = Luma([disp]);
            }
        }

        let obstacles = DisparityMap::from_luma(obstacles);
        debug!(
            "Obstacle map has {} candidate pixels above threshold {}",
            obstacles.count_nonzero(),
            self.threshold
        );

        Ok(obstacles)
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_significant_differences() {
        let mut bg = DisparityMap::new(3, 1);
        bg.put(0, 0, 10);
        bg.put(1, 0, 10);
        bg.put(2, 0, 200);

        let mut scene = DisparityMap::new(3, 1);
        scene.put(0, 0, 60); // diff 50, not strictly above
        scene.put(1, 0, 61); // diff 51
        scene.put(2, 0, 100); // negative diff saturates to zero

        let model = BackgroundModel::new(bg, 50).unwrap();
        let obstacles = model.obstacles(&scene).unwrap();

        assert_eq!(obstacles.samples().collect::<Vec<_>>(), vec![0, 61, 0]);
    }

    #[test]
    fn rejects_mismatched_scene() {
        let model = BackgroundModel::new(DisparityMap::new(4, 4), 10).unwrap();
        let res = model.obstacles(&DisparityMap::new(4, 5));
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn rejects_empty_maps() {
        assert!(matches!(
            BackgroundModel::new(DisparityMap::new(0, 0), 10),
            Err(Error::EmptyMap)
        ));
    }
}
