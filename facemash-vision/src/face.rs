use image::RgbaImage;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Point normalized to [0, 1] on both axes of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
}

/// Face extent as fractions of the canvas width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// One entry of `face_keypoints.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub file: String,
    pub bounding_box: BoundingBox,
    pub left_eye: Keypoint,
    pub right_eye: Keypoint,
    pub nose: Keypoint,
    pub mouth: Keypoint,
}

impl Face {
    pub fn keypoint(&self, kind: PartKind) -> Keypoint {
        match kind {
            PartKind::LeftEye => self.left_eye,
            PartKind::RightEye => self.right_eye,
            PartKind::Nose => self.nose,
            PartKind::Mouth => self.mouth,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceCatalog {
    pub faces: Vec<Face>,
}

impl FaceCatalog {
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Uniformly pick one face, `None` for an empty catalog
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Face> {
        self.faces.choose(rng)
    }
}

/// The four facial feature categories a face is cut into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    LeftEye,
    RightEye,
    Nose,
    Mouth,
}

impl PartKind {
    pub const ALL: [PartKind; 4] = [
        PartKind::LeftEye,
        PartKind::RightEye,
        PartKind::Nose,
        PartKind::Mouth,
    ];

    /// Layering order on the collage, bottom to top
    pub const PASTE_ORDER: [PartKind; 4] = [
        PartKind::Nose,
        PartKind::LeftEye,
        PartKind::RightEye,
        PartKind::Mouth,
    ];

    /// Name of the pool directory holding parts of this kind
    pub fn dir_name(self) -> &'static str {
        match self {
            PartKind::LeftEye => "left_eye",
            PartKind::RightEye => "right_eye",
            PartKind::Nose => "nose",
            PartKind::Mouth => "mouth",
        }
    }
}

impl std::fmt::Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One image per part kind
#[derive(Debug, Clone)]
pub struct Parts {
    pub left_eye: RgbaImage,
    pub right_eye: RgbaImage,
    pub nose: RgbaImage,
    pub mouth: RgbaImage,
}

impl Parts {
    pub fn get(&self, kind: PartKind) -> &RgbaImage {
        match kind {
            PartKind::LeftEye => &self.left_eye,
            PartKind::RightEye => &self.right_eye,
            PartKind::Nose => &self.nose,
            PartKind::Mouth => &self.mouth,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PartKind, &RgbaImage)> {
        PartKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn face(file: &str) -> Face {
        let p = Keypoint { x: 0.5, y: 0.5 };
        Face {
            file: file.to_string(),
            bounding_box: BoundingBox {
                width: 0.4,
                height: 0.4,
            },
            left_eye: p,
            right_eye: p,
            nose: p,
            mouth: p,
        }
    }

    #[test]
    fn test_choose_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(FaceCatalog::default().choose(&mut rng).is_none());
    }

    #[test]
    fn test_choose_covers_catalog() {
        let catalog = FaceCatalog {
            faces: vec![face("a.png"), face("b.png"), face("c.png")],
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(catalog.choose(&mut rng).unwrap().file.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_paste_order_covers_all_kinds() {
        for kind in PartKind::ALL {
            assert!(PartKind::PASTE_ORDER.contains(&kind));
        }
        assert_eq!(PartKind::PASTE_ORDER[0], PartKind::Nose);
        assert_eq!(PartKind::PASTE_ORDER[3], PartKind::Mouth);
    }
}
