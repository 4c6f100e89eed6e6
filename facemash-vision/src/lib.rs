pub mod compose;
pub mod extract;
pub mod face;
pub mod geometry;
pub mod mask;

// Re-export commonly used types
pub use compose::{compose, Background, ScaleModifiers};
pub use extract::{crop_piece, extract_parts};
pub use face::{BoundingBox, Face, FaceCatalog, Keypoint, PartKind, Parts};
pub use geometry::{Canvas, CANVAS_SIZE};
pub use mask::polygon_mask;
