use crate::face::Keypoint;

/// Default collage and source image size
pub const CANVAS_SIZE: u32 = 1024;

/// Pixel size that normalized coordinates are expressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel position of `keypoint`, shifted back by the given offsets so that an
    /// image of that half-size pasted there is centered on the keypoint
    pub fn keypoint(&self, keypoint: Keypoint, x_offset: i64, y_offset: i64) -> (i64, i64) {
        denormalize_keypoint(keypoint, self.width, self.height, x_offset, y_offset)
    }
}

/// Normalized fraction to whole pixels, truncating toward zero
pub fn denormalize_value(value: f64, size: u32) -> i64 {
    (value * size as f64) as i64
}

pub fn denormalize_keypoint(
    keypoint: Keypoint,
    width: u32,
    height: u32,
    x_offset: i64,
    y_offset: i64,
) -> (i64, i64) {
    (
        denormalize_value(keypoint.x, width) - x_offset,
        denormalize_value(keypoint.y, height) - y_offset,
    )
}

/// Round odd lengths down so a crop has an integral center. Negative input
/// clamps to zero.
pub fn make_even(value: i64) -> u32 {
    let value = value.max(0) as u32;
    value - value % 2
}

/// Pixel rectangle, left/top inclusive, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Even-sized rectangle centered on `center`, lifted by `y_offset`
    pub fn centered(center: (i64, i64), width: u32, height: u32, y_offset: i64) -> Self {
        let (cx, cy) = center;
        Self {
            left: cx - (width / 2) as i64,
            top: cy - (height / 2) as i64 - y_offset,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.left + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.top + self.height as i64
    }

    /// Part of this rectangle inside a `width` x `height` image
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let left = self.left.max(0);
        let top = self.top.max(0);
        let right = self.right().min(width as i64);
        let bottom = self.bottom().min(height as i64);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            left,
            top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}
