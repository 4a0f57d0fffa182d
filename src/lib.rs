//! # Closest Obstacle Detection
//!
//! This crate finds the obstacle closest to a stereo camera rig by comparing disparity maps
//! against a background map of the empty scene.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

mod background;
pub mod band;
pub mod bins;
mod detection;
mod disparity;
mod error;
pub mod histogram;
pub mod mask;
mod params;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use background::BackgroundModel;
pub use error::{Error, Result};
pub use params::Params;

pub mod prelude {
    pub use crate::band::ObjectBand;
    pub use crate::detection::{DetectionResult, ObjectDetection, ObstacleDetector};
    pub use crate::disparity::DisparityMap;
    pub use crate::mask::ObjectMask;
    pub use crate::params::Params;
}
