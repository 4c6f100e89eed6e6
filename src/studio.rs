use anyhow::{Context, Result};
use facemash_vision::{
    compose, extract_parts, Background, Canvas, Face, FaceCatalog, PartKind, Parts, ScaleModifiers,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use crate::config::Config;
use crate::storage::{self, Layout};

/// Seeded generator when a seed is given, OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Catalog, layout and RNG shared by one extraction or composition run
pub struct Studio<R = StdRng> {
    pub layout: Layout,
    pub catalog: FaceCatalog,
    pub canvas: Canvas,
    rng: R,
}

impl Studio<StdRng> {
    /// Create the directory layout and load the keypoint catalog
    pub fn open(cfg: &Config, seed: Option<u64>) -> Result<Self> {
        let layout = Layout::from_config(cfg);
        layout.ensure().context("preparing directories")?;
        let catalog = storage::load_catalog(&layout.keypoints_path())?;
        info!("Loaded {} face(s) from {}", catalog.len(), layout.keypoints_path().display());
        Ok(Self::new(
            layout,
            catalog,
            cfg.canvas(),
            make_rng(seed.or(cfg.seed)),
        ))
    }
}

impl<R: Rng> Studio<R> {
    pub fn new(layout: Layout, catalog: FaceCatalog, canvas: Canvas, rng: R) -> Self {
        Self {
            layout,
            catalog,
            canvas,
            rng,
        }
    }

    /// Cut one face into parts and store them in the pools
    pub fn extract_face(&mut self, face: &Face) -> Result<Parts> {
        cut_face(&self.layout, &mut self.rng, self.canvas, face)
    }

    /// Cut every face of the catalog, returning how many were processed
    pub fn extract_all(&mut self) -> Result<usize> {
        info!("Cropping face parts...");
        for face in &self.catalog.faces {
            info!("Processing face {}...", face.file);
            cut_face(&self.layout, &mut self.rng, self.canvas, face)?;
        }
        info!("Done!");
        Ok(self.catalog.len())
    }

    /// Build one collage and save it as `collages/{sequence:05}.png`
    pub fn generate_collage(&mut self, sequence: u32, background: Background) -> Result<PathBuf> {
        let face = self
            .catalog
            .choose(&mut self.rng)
            .cloned()
            .context("face catalog is empty")?;
        let modifiers = ScaleModifiers::sample(&mut self.rng);

        let mut pick = |kind: PartKind| -> Result<_> {
            let path = storage::choose_part(&self.layout, kind, &mut self.rng)?;
            log::debug!("{}: {}", kind, path.display());
            storage::load_image(&path)
        };
        let parts = Parts {
            left_eye: pick(PartKind::LeftEye)?,
            right_eye: pick(PartKind::RightEye)?,
            nose: pick(PartKind::Nose)?,
            mouth: pick(PartKind::Mouth)?,
        };

        let base = storage::load_face(&self.layout, &face.file)?;
        let collage = compose(&face, &base, &parts, &modifiers, self.canvas, background);

        let path = self.layout.collage_path(sequence);
        collage
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("saving {}", path.display()))?;
        Ok(path)
    }

    /// Generate collages numbered `0..count`
    pub fn generate_collages(&mut self, count: u32, background: Background) -> Result<Vec<PathBuf>> {
        info!("Generating collages...");
        let mut written = Vec::with_capacity(count as usize);
        for i in 0..count {
            info!("Generating collage {}...", i + 1);
            written.push(self.generate_collage(i, background)?);
        }
        Ok(written)
    }
}

fn cut_face<R: Rng>(layout: &Layout, rng: &mut R, canvas: Canvas, face: &Face) -> Result<Parts> {
    let image = storage::load_face(layout, &face.file)?;
    let parts = extract_parts(rng, face, &image, canvas);
    storage::save_parts(layout, &face.file, &parts)
        .with_context(|| format!("saving parts of {}", face.file))?;
    Ok(parts)
}
