pub mod color;
pub mod config;
pub mod prompt;
pub mod storage;
pub mod studio;

// Re-export vision types for convenience
pub use facemash_vision::{
    compose, extract, face, geometry, mask, Background, Canvas, Face, FaceCatalog, PartKind,
    Parts,
};
pub use studio::Studio;
