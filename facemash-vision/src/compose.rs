use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::face::{BoundingBox, Face, PartKind, Parts};
use crate::geometry::{denormalize_value, Canvas};

/// What the collage canvas starts out as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    /// Solid fill; always drawn fully opaque whatever the color's own alpha
    Solid(Rgba<u8>),
}

/// Per-part size multipliers drawn for one collage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleModifiers {
    pub left_eye: f64,
    pub right_eye: f64,
    pub nose: f64,
    pub mouth: f64,
}

impl ScaleModifiers {
    /// Draw each multiplier independently; the two eyes are not tied together
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw = |kind: PartKind| {
            let (lo, hi) = scale_range(kind);
            rng.gen_range(lo..hi)
        };
        Self {
            left_eye: draw(PartKind::LeftEye),
            right_eye: draw(PartKind::RightEye),
            nose: draw(PartKind::Nose),
            mouth: draw(PartKind::Mouth),
        }
    }

    pub fn get(&self, kind: PartKind) -> f64 {
        match kind {
            PartKind::LeftEye => self.left_eye,
            PartKind::RightEye => self.right_eye,
            PartKind::Nose => self.nose,
            PartKind::Mouth => self.mouth,
        }
    }
}

impl Default for ScaleModifiers {
    fn default() -> Self {
        Self {
            left_eye: 1.0,
            right_eye: 1.0,
            nose: 1.0,
            mouth: 1.0,
        }
    }
}

pub fn scale_range(kind: PartKind) -> (f64, f64) {
    match kind {
        PartKind::LeftEye | PartKind::RightEye => (1.0, 3.0),
        PartKind::Nose => (0.8, 1.5),
        PartKind::Mouth => (0.8, 2.2),
    }
}

/// On-collage size of `kind` as fractions of the face bounding box. These
/// differ from the crop fractions: how much was cut and how big it is drawn
/// are independent.
pub fn size_fraction(kind: PartKind) -> (f64, f64) {
    match kind {
        PartKind::LeftEye | PartKind::RightEye => (0.25, 0.2),
        PartKind::Nose => (0.25, 0.5),
        PartKind::Mouth => (0.5, 0.25),
    }
}

/// Pixel size a part of `kind` is resized to, never below one pixel
pub fn target_size(
    kind: PartKind,
    bounding_box: BoundingBox,
    modifier: f64,
    canvas: Canvas,
) -> (u32, u32) {
    let (fw, fh) = size_fraction(kind);
    let w = denormalize_value(fw * bounding_box.width * modifier, canvas.width);
    let h = denormalize_value(fh * bounding_box.height * modifier, canvas.height);
    (w.max(1) as u32, h.max(1) as u32)
}

pub fn new_canvas(canvas: Canvas, background: Background) -> RgbaImage {
    match background {
        Background::Transparent => RgbaImage::new(canvas.width, canvas.height),
        Background::Solid(Rgba([r, g, b, _])) => {
            RgbaImage::from_pixel(canvas.width, canvas.height, Rgba([r, g, b, 255]))
        }
    }
}

/// Lay `face`'s base image and the given parts onto a fresh canvas.
///
/// Every part is resized to its target size and centered on the matching
/// keypoint of `face`, regardless of which face it was cut from. Layers go
/// base, nose, left eye, right eye, mouth.
pub fn compose(
    face: &Face,
    base: &RgbaImage,
    parts: &Parts,
    modifiers: &ScaleModifiers,
    canvas: Canvas,
    background: Background,
) -> RgbaImage {
    let mut collage = new_canvas(canvas, background);
    imageops::overlay(&mut collage, base, 0, 0);

    for kind in PartKind::PASTE_ORDER {
        let (w, h) = target_size(kind, face.bounding_box, modifiers.get(kind), canvas);
        let part = imageops::resize(parts.get(kind), w, h, FilterType::CatmullRom);
        let (x, y) = canvas.keypoint(face.keypoint(kind), (w / 2) as i64, (h / 2) as i64);
        log::debug!("pasting {} {}x{} at ({}, {})", kind, w, h, x, y);
        imageops::overlay(&mut collage, &part, x, y);
    }

    collage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::Keypoint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn face_at(nose: Keypoint) -> Face {
        let p = Keypoint { x: 0.5, y: 0.5 };
        Face {
            file: "base.png".into(),
            bounding_box: BoundingBox {
                width: 0.4,
                height: 0.4,
            },
            left_eye: p,
            right_eye: p,
            nose,
            mouth: p,
        }
    }

    fn solid_parts(color: Rgba<u8>) -> Parts {
        let part = RgbaImage::from_pixel(40, 40, color);
        Parts {
            left_eye: part.clone(),
            right_eye: part.clone(),
            nose: part.clone(),
            mouth: part,
        }
    }

    #[test]
    fn test_modifiers_within_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let m = ScaleModifiers::sample(&mut rng);
            for kind in PartKind::ALL {
                let (lo, hi) = scale_range(kind);
                let v = m.get(kind);
                assert!(v >= lo && v < hi, "{kind}: {v}");
            }
        }
    }

    #[test]
    fn test_eye_modifiers_independent() {
        let mut rng = StdRng::seed_from_u64(10);
        let differs = (0..20)
            .map(|_| ScaleModifiers::sample(&mut rng))
            .any(|m| m.left_eye != m.right_eye);
        assert!(differs);
    }

    #[test]
    fn test_target_size() {
        let bb = BoundingBox {
            width: 0.4,
            height: 0.4,
        };
        let canvas = Canvas::default();
        assert_eq!(target_size(PartKind::LeftEye, bb, 1.0, canvas), (102, 81));
        assert_eq!(target_size(PartKind::Mouth, bb, 2.0, canvas), (409, 204));
        assert_eq!(target_size(PartKind::Nose, bb, 0.0, canvas), (1, 1));
    }

    #[test]
    fn test_solid_background_forced_opaque() {
        let img = new_canvas(
            Canvas::new(8, 8),
            Background::Solid(Rgba([255, 0, 0, 10])),
        );
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_background() {
        let img = new_canvas(Canvas::new(8, 8), Background::Transparent);
        assert!(img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_compose_keeps_canvas_size() {
        let face = face_at(Keypoint { x: 0.5, y: 0.5 });
        let base = RgbaImage::from_pixel(300, 300, Rgba([255, 0, 255, 255]));
        let out = compose(
            &face,
            &base,
            &solid_parts(Rgba([200, 200, 200, 255])),
            &ScaleModifiers::default(),
            Canvas::default(),
            Background::Transparent,
        );
        assert_eq!(out.dimensions(), (1024, 1024));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 255, 255]);
        assert_eq!(out.get_pixel(1000, 1000)[3], 0);
    }

    #[test]
    fn test_compose_centers_part_on_keypoint() {
        let nose = Keypoint { x: 0.25, y: 0.75 };
        let face = face_at(nose);
        let base = RgbaImage::new(1024, 1024);
        let parts = Parts {
            nose: RgbaImage::from_pixel(40, 40, Rgba([0, 255, 0, 255])),
            ..solid_parts(Rgba([0, 0, 0, 0]))
        };
        let out = compose(
            &face,
            &base,
            &parts,
            &ScaleModifiers::default(),
            Canvas::default(),
            Background::Transparent,
        );
        // nose target is 102x204 centered on (256, 768)
        assert_eq!(out.get_pixel(256, 768).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(206, 667).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(204, 768)[3], 0);
        assert_eq!(out.get_pixel(256, 870)[3], 0);
    }

    #[test]
    fn test_compose_layer_order() {
        let face = face_at(Keypoint { x: 0.5, y: 0.5 });
        let base = RgbaImage::new(1024, 1024);
        let parts = Parts {
            left_eye: RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])),
            right_eye: RgbaImage::from_pixel(10, 10, Rgba([0, 255, 0, 255])),
            nose: RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255])),
            mouth: RgbaImage::from_pixel(10, 10, Rgba([255, 255, 0, 255])),
        };
        let out = compose(
            &face,
            &base,
            &parts,
            &ScaleModifiers::default(),
            Canvas::default(),
            Background::Transparent,
        );
        // all four centered on the same point, mouth drawn last
        assert_eq!(out.get_pixel(512, 512).0, [255, 255, 0, 255]);
        // nose is the tallest and drawn first, its ends stay visible
        assert_eq!(out.get_pixel(512, 420).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_masked_out_corners_show_base() {
        let face = face_at(Keypoint { x: 0.5, y: 0.5 });
        let base = RgbaImage::from_pixel(1024, 1024, Rgba([0, 0, 255, 255]));
        // opaque red core, transparent green frame
        let nose = RgbaImage::from_fn(40, 40, |x, y| {
            if (10..30).contains(&x) && (10..30).contains(&y) {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 255, 0, 0])
            }
        });
        let parts = Parts {
            nose,
            ..solid_parts(Rgba([0, 0, 0, 0]))
        };
        let out = compose(
            &face,
            &base,
            &parts,
            &ScaleModifiers::default(),
            Canvas::default(),
            Background::Transparent,
        );
        // nose is 102x204 pasted at (461, 410)
        assert_eq!(out.get_pixel(461, 410).0, [0, 0, 255, 255]);
        assert_eq!(out.get_pixel(562, 613).0, [0, 0, 255, 255]);
        assert_eq!(out.get_pixel(512, 512).0, [255, 0, 0, 255]);
    }
}
