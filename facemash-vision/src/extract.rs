use image::{imageops, Rgba, RgbaImage};
use rand::Rng;

use crate::face::{BoundingBox, Face, PartKind, Parts};
use crate::geometry::{denormalize_value, make_even, Canvas, Rect};
use crate::mask::polygon_mask;

/// Fraction of the canvas height the nose window is lifted by. The nose
/// keypoint marks the tip, the crop should reach the bridge.
pub const NOSE_LIFT: f64 = 0.05;

/// Crop window of `kind` as fractions of the face bounding box (width, height)
pub fn crop_fraction(kind: PartKind) -> (f64, f64) {
    match kind {
        PartKind::LeftEye | PartKind::RightEye => (0.45, 0.4),
        PartKind::Nose => (0.25, 0.5),
        PartKind::Mouth => (0.55, 0.3),
    }
}

/// Crop window of `kind` in pixels, before evening out
pub fn crop_size(kind: PartKind, bounding_box: BoundingBox, canvas: Canvas) -> (i64, i64) {
    let (fw, fh) = crop_fraction(kind);
    (
        denormalize_value(fw * bounding_box.width, canvas.width),
        denormalize_value(fh * bounding_box.height, canvas.height),
    )
}

/// Cut a `width` x `height` window centered on `center` (lifted by
/// `y_offset`) out of `image` and replace its alpha with a jittered polygon
/// mask.
///
/// Odd sizes are rounded down to even. Window pixels falling outside the
/// source stay transparent black; the result always has the window's size.
pub fn crop_piece<R: Rng + ?Sized>(
    rng: &mut R,
    image: &RgbaImage,
    center: (i64, i64),
    width: i64,
    height: i64,
    y_offset: i64,
) -> RgbaImage {
    let width = make_even(width);
    let height = make_even(height);
    let window = Rect::centered(center, width, height, y_offset);

    let mut piece = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    if let Some(src) = window.clip(image.width(), image.height()) {
        let view = imageops::crop_imm(
            image,
            src.left as u32,
            src.top as u32,
            src.width,
            src.height,
        );
        imageops::replace(
            &mut piece,
            &view.to_image(),
            src.left - window.left,
            src.top - window.top,
        );
    } else {
        log::debug!("crop window {:?} lies outside the source image", window);
    }

    let mask = polygon_mask(rng, ((width / 2) as i32, (height / 2) as i32), width, height);
    for (pixel, alpha) in piece.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }
    piece
}

/// Cut the four facial parts of `face` out of its base image
pub fn extract_parts<R: Rng + ?Sized>(
    rng: &mut R,
    face: &Face,
    image: &RgbaImage,
    canvas: Canvas,
) -> Parts {
    let nose_lift = denormalize_value(NOSE_LIFT, canvas.height);
    let mut cut = |kind: PartKind| {
        let (width, height) = crop_size(kind, face.bounding_box, canvas);
        let center = canvas.keypoint(face.keypoint(kind), 0, 0);
        let y_offset = if kind == PartKind::Nose { nose_lift } else { 0 };
        let piece = crop_piece(&mut *rng, image, center, width, height, y_offset);
        log::debug!(
            "{}: {} at {:?} -> {}x{}",
            face.file,
            kind,
            center,
            piece.width(),
            piece.height()
        );
        piece
    };

    Parts {
        left_eye: cut(PartKind::LeftEye),
        right_eye: cut(PartKind::RightEye),
        nose: cut(PartKind::Nose),
        mouth: cut(PartKind::Mouth),
    }
}
