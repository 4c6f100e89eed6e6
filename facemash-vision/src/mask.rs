use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use rand::Rng;

pub const OPAQUE: u8 = 255;

/// Corners of the `width` x `height` rectangle around `center`, each pulled
/// toward the middle by up to a quarter of the side length on both axes.
///
/// Returned in drawing order: top-left, top-right, bottom-right, bottom-left.
pub fn mask_corners<R: Rng + ?Sized>(
    rng: &mut R,
    center: (i32, i32),
    width: u32,
    height: u32,
) -> [Point<i32>; 4] {
    let (cx, cy) = center;
    let half_w = (width / 2) as i32;
    let half_h = (height / 2) as i32;
    let max_dx = (width / 4) as i32;
    let max_dy = (height / 4) as i32;

    let left = cx - half_w;
    let right = cx + half_w;
    let top = cy - half_h;
    let bottom = cy + half_h;

    let top_left = Point::new(
        left + rng.gen_range(0..=max_dx),
        top + rng.gen_range(0..=max_dy),
    );
    let top_right = Point::new(
        right - rng.gen_range(0..=max_dx),
        top + rng.gen_range(0..=max_dy),
    );
    let bottom_left = Point::new(
        left + rng.gen_range(0..=max_dx),
        bottom - rng.gen_range(0..=max_dy),
    );
    let bottom_right = Point::new(
        right - rng.gen_range(0..=max_dx),
        bottom - rng.gen_range(0..=max_dy),
    );

    [top_left, top_right, bottom_right, bottom_left]
}

/// Single channel mask of exactly `width` x `height`: opaque inside a randomly
/// jittered quadrilateral, transparent outside.
///
/// A side shorter than two pixels has no room for a polygon, so the whole
/// rectangle is opaque.
pub fn polygon_mask<R: Rng + ?Sized>(
    rng: &mut R,
    center: (i32, i32),
    width: u32,
    height: u32,
) -> GrayImage {
    if width / 2 == 0 || height / 2 == 0 {
        return GrayImage::from_pixel(width, height, Luma([OPAQUE]));
    }

    let corners = mask_corners(rng, center, width, height);
    let mut mask = GrayImage::new(width, height);
    draw_polygon_mut(&mut mask, &corners, Luma([OPAQUE]));
    mask
}

/// Number of opaque pixels
pub fn mask_area(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] == OPAQUE).count()
}
