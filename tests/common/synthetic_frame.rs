use cv_obstacle::prelude::*;

/// A rectangular block of constant disparity.
#[derive(Clone, Copy, Debug)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub disparity: u8,
}

impl Block {
    pub fn square(x: u32, y: u32, size: u32, disparity: u8) -> Self {
        Block {
            x,
            y,
            width: size,
            height: size,
            disparity,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Background with disparity falling off towards the top of the frame, like a floor plane.
pub fn floor_background(width: u32, height: u32) -> DisparityMap {
    assert!(width > 0 && height > 0, "frame dimensions must be positive");

    let mut map = DisparityMap::new(width, height);
    for y in 0..height {
        let disp = (y * 60 / height) as u8;
        for x in 0..width {
            map.put(x, y, disp);
        }
    }
    map
}

/// Copy `background` and paint `blocks` on top of it, later blocks win.
pub fn scene_with_blocks(background: &DisparityMap, blocks: &[Block]) -> DisparityMap {
    let mut scene = background.clone();
    for b in blocks {
        for y in b.y..b.y + b.height {
            for x in b.x..b.x + b.width {
                scene.put(x, y, b.disparity);
            }
        }
    }
    scene
}
