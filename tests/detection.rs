//! End to end detection on synthetic disparity frames.

mod common;

use common::synthetic_frame::{floor_background, scene_with_blocks, Block};
use cv_obstacle::histogram::Histogram;
use cv_obstacle::prelude::*;
use cv_obstacle::Error;

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

fn reference_params() -> Params {
    Params {
        threshold: 50,
        number_values: 255,
        hist_size: 256,
        min_base: 2,
        ..Default::default()
    }
}

#[test]
fn empty_scene_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let det = ObjectDetection::new(reference_params(), DisparityMap::new(WIDTH, HEIGHT))?;
    let res = det.detect(&DisparityMap::new(WIDTH, HEIGHT))?;

    assert!(!res.found);
    assert!(res.mask.is_none());
    assert!(res.band.is_none());
    Ok(())
}

#[test]
fn scene_matching_background_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let bg = floor_background(WIDTH, HEIGHT);
    let det = ObjectDetection::new(reference_params(), bg.clone())?;

    assert_eq!(det.obstacles(&bg)?.count_nonzero(), 0);
    assert!(!det.detect(&bg)?.found);
    Ok(())
}

#[test]
fn single_block_is_recovered() -> Result<(), Box<dyn std::error::Error>> {
    let block = Block::square(20, 20, 10, 200);
    let scene = scene_with_blocks(&DisparityMap::new(WIDTH, HEIGHT), &[block]);
    let det = ObjectDetection::new(reference_params(), DisparityMap::new(WIDTH, HEIGHT))?;

    let hist = det.histogram(&det.obstacles(&scene)?)?;
    assert_eq!(hist.len(), 256);
    assert_eq!(hist.get(200), 100);
    assert_eq!(hist.total(), 100);

    let res = det.detect(&scene)?;
    assert!(res.found);

    let mask = res.mask.expect("found result carries a mask");
    assert_eq!(mask.dimensions(), (WIDTH, HEIGHT));

    // Four erosion passes leave the 2x2 core of the block
    assert_eq!(mask.area(), 4);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if mask.contains(x, y) {
                assert!(block.contains(x, y), "mask pixel ({}, {}) outside block", x, y);
            }
        }
    }

    let band = res.band.expect("found result carries a band");
    assert_eq!(band.area, 100);
    assert!(band.intensities.contains(200.0));
    Ok(())
}

#[test]
fn block_eroded_away_is_still_found() -> Result<(), Box<dyn std::error::Error>> {
    let scene = scene_with_blocks(&DisparityMap::new(32, 32), &[Block::square(10, 10, 5, 200)]);
    let det = ObjectDetection::new(Params::default(), DisparityMap::new(32, 32))?;

    let res = det.detect(&scene)?;

    // The band exists in the histogram even though erosion leaves no pixels
    assert!(res.found);
    assert_eq!(res.band.expect("found result carries a band").area, 25);
    let mask = res.mask.expect("found result carries a mask");
    assert_eq!(mask.area(), 0);
    assert!(mask.is_empty());
    Ok(())
}

#[test]
fn mask_is_subset_of_closest_block_over_floor() -> Result<(), Box<dyn std::error::Error>> {
    let bg = floor_background(WIDTH, HEIGHT);
    let far = Block::square(4, 4, 16, 120);
    let near = Block {
        x: 30,
        y: 10,
        width: 24,
        height: 20,
        disparity: 210,
    };
    let scene = scene_with_blocks(&bg, &[far, near]);
    let det = ObjectDetection::new(reference_params(), bg)?;

    let res = det.detect(&scene)?;
    assert!(res.found);

    let mask = res.mask.unwrap();
    assert_eq!(mask.area(), (24 - 8) * (20 - 8));
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if mask.contains(x, y) {
                assert!(near.contains(x, y));
            }
        }
    }

    let bbox = mask.bounding_box().unwrap();
    assert_eq!((bbox.left(), bbox.top()), (34, 14));
    Ok(())
}

#[test]
fn detection_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let bg = floor_background(WIDTH, HEIGHT);
    let scene = scene_with_blocks(&bg, &[Block::square(10, 10, 20, 150)]);
    let det = ObjectDetection::new(reference_params(), bg)?;

    let first = det.detect(&scene)?;
    let second = det.detect(&scene)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn peeled_bands_end_at_closest_significant_object() -> Result<(), Box<dyn std::error::Error>> {
    let bg = DisparityMap::new(WIDTH, HEIGHT);
    let scene = scene_with_blocks(
        &bg,
        &[
            Block::square(2, 2, 20, 90),
            Block::square(30, 2, 15, 160),
            // Too small to pass the area cutoff
            Block::square(50, 40, 3, 240),
        ],
    );
    let params = Params {
        min_area: 50,
        ..reference_params()
    };
    let det = ObjectDetection::new(params, bg)?;

    let bands = det.detect_bands(&scene)?;
    assert_eq!(bands.len(), 2);
    assert!(bands[0].intensities.contains(90.0));
    assert!(bands[1].intensities.contains(160.0));
    assert_eq!(bands[1].area, 15 * 15);

    // The primary search still reports the tiny closest block
    let res = det.detect(&scene)?;
    assert!(res.band.unwrap().intensities.contains(240.0));
    Ok(())
}

#[test]
fn shaped_histogram_suppresses_noise_floor() {
    let hist = Histogram::from_counts(vec![0, 2, 1, 3, 0, 9]);
    let shaped = hist.shape(2);

    for (orig, &out) in hist.counts().iter().zip(shaped.counts()) {
        if *orig <= 2 {
            assert_eq!(out, 0);
        } else {
            assert_eq!(out, *orig);
        }
    }
}

#[test]
fn mismatched_scene_fails_fast() -> Result<(), Box<dyn std::error::Error>> {
    let det = ObjectDetection::new(reference_params(), DisparityMap::new(WIDTH, HEIGHT))?;
    let res = det.detect(&DisparityMap::new(WIDTH / 2, HEIGHT));

    match res {
        Err(Error::DimensionMismatch { scene, background }) => {
            assert_eq!(scene, (WIDTH / 2, HEIGHT));
            assert_eq!(background, (WIDTH, HEIGHT));
        }
        other => panic!("expected dimension mismatch, got {:?}", other),
    }
    Ok(())
}

#[test]
fn params_load_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("cv_obstacle_params_load_from_json.json");
    std::fs::write(&path, r#"{ "threshold": 20, "hist_size": 128, "erode_iterations": 2 }"#)?;

    let params = Params::from_json_file(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(params.threshold, 20);
    assert_eq!(params.hist_size, 128);
    assert_eq!(params.erode_iterations, 2);
    assert_eq!(params.number_values, 255);
    Ok(())
}
