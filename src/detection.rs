//! # Closest object detection
//!
//! Ties the stages together: background differencing, histogram computation and shaping, the
//! closest band search and mask extraction.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::{debug, warn};

use crate::background::BackgroundModel;
use crate::band::{self, ObjectBand};
use crate::bins::BinMapper;
use crate::disparity::DisparityMap;
use crate::error::*;
use crate::histogram::Histogram;
use crate::mask::ObjectMask;
use crate::params::Params;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Detector of the obstacle closest to the camera rig.
///
/// A detector created with [`ObjectDetection::placeholder`] has no background and refuses to
/// detect until one is supplied with [`ObjectDetection::with_background`].
#[derive(Debug, Clone)]
pub struct ObjectDetection {
    params: Params,
    mapper: BinMapper,
    background: Option<BackgroundModel>,
}

/// Result of a single detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub found: bool,

    /// Mask of the closest object, `None` when nothing was found.
    pub mask: Option<ObjectMask>,

    /// Histogram band the mask was extracted from.
    pub band: Option<ObjectBand>,
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait ObstacleDetector {
    /// Detect the closest obstacle in the given disparity frame.
    fn detect(&self, scene: &DisparityMap) -> Result<DetectionResult>;
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl DetectionResult {
    pub fn not_found() -> Self {
        Self {
            found: false,
            mask: None,
            band: None,
        }
    }
}

impl ObjectDetection {
    /// Create a detector against the given empty-scene background.
    pub fn new(params: Params, background: DisparityMap) -> Result<Self> {
        Self::placeholder(params)?.with_background(background)
    }

    /// Create a detector without a background.
    pub fn placeholder(params: Params) -> Result<Self> {
        Ok(Self {
            mapper: BinMapper::new(&params)?,
            params,
            background: None,
        })
    }

    /// Supply the background map, replacing any previous one.
    pub fn with_background(mut self, background: DisparityMap) -> Result<Self> {
        self.background = Some(BackgroundModel::new(background, self.params.threshold)?);
        Ok(self)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn mapper(&self) -> &BinMapper {
        &self.mapper
    }

    pub fn is_initialised(&self) -> bool {
        self.background.is_some()
    }

    /// Compute the obstacle map of a scene.
    pub fn obstacles(&self, scene: &DisparityMap) -> Result<DisparityMap> {
        self.background
            .as_ref()
            .ok_or(Error::Uninitialised)?
            .obstacles(scene)
    }

    /// Compute the shaped obstacle histogram of a scene.
    pub fn histogram(&self, obstacles: &DisparityMap) -> Result<Histogram> {
        let hist = Histogram::compute(obstacles, &self.params)?;
        Ok(hist.shape(self.params.min_base))
    }

    /// Peel every significant band from the scene's histogram, farthest first.
    ///
    /// Bands with a histogram area below `params.min_area` end the search.
    pub fn detect_bands(&self, scene: &DisparityMap) -> Result<Vec<ObjectBand>> {
        let obstacles = self.obstacles(scene)?;
        let hist = self.histogram(&obstacles)?;

        Ok(band::peel_bands(&hist, &self.mapper, self.params.min_area))
    }
}

impl ObstacleDetector for ObjectDetection {
    fn detect(&self, scene: &DisparityMap) -> Result<DetectionResult> {
        let obstacles = self.obstacles(scene)?;
        let hist = self.histogram(&obstacles)?;

        let bins = match band::find_closest(&hist) {
            Some(b) => b,
            None => {
                debug!("No obstacle above the noise floor");
                return Ok(DetectionResult::not_found());
            }
        };

        let band = ObjectBand::from_range(&hist, bins, &self.mapper);
        debug!(
            "Closest band {}..={} (intensity {:.1}..{:.1}), area {}",
            bins.lower, bins.upper, band.intensities.lower, band.intensities.upper, band.area
        );

        let mask = ObjectMask::extract(&obstacles, band.intensities, self.params.erode_iterations);
        if mask.is_empty() {
            warn!(
                "Erosion removed every pixel of band {}..={}",
                bins.lower, bins.upper
            );
        }

        Ok(DetectionResult {
            found: true,
            mask: Some(mask),
            band: Some(band),
        })
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
