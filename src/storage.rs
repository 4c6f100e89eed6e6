use anyhow::{Context, Result};
use facemash_vision::{FaceCatalog, PartKind, Parts};
use image::{ImageFormat, ImageReader, RgbaImage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("{kind} part pool at {} is empty, run `facemash extract` first", .path.display())]
    Empty { kind: PartKind, path: PathBuf },
}

/// On-disk locations of base faces, part pools and collages
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    keypoints_file: String,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            keypoints_file: Config::default().keypoints_file,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            root: cfg.root.clone(),
            keypoints_file: cfg.keypoints_file.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn keypoints_path(&self) -> PathBuf {
        self.root.join(&self.keypoints_file)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn faces_dir(&self) -> PathBuf {
        self.images_dir().join("face_container")
    }

    pub fn pool_dir(&self, kind: PartKind) -> PathBuf {
        self.images_dir().join(kind.dir_name())
    }

    pub fn collages_dir(&self) -> PathBuf {
        self.root.join("collages")
    }

    pub fn collage_path(&self, sequence: u32) -> PathBuf {
        self.collages_dir().join(format!("{:05}.png", sequence))
    }

    /// Create every directory of the layout that does not exist yet
    pub fn ensure(&self) -> Result<()> {
        let dirs = [self.collages_dir(), self.faces_dir()]
            .into_iter()
            .chain(PartKind::ALL.into_iter().map(|kind| self.pool_dir(kind)));
        for dir in dirs {
            if !dir.exists() {
                log::debug!("creating {}", dir.display());
            }
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        Ok(())
    }
}

pub fn load_catalog(path: &Path) -> Result<FaceCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading keypoints {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing keypoints {}", path.display()))
}

/// Decode by content rather than extension: parts keep the source face's file
/// name but are always written as PNG
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(img.to_rgba8())
}

pub fn load_face(layout: &Layout, file: &str) -> Result<RgbaImage> {
    load_image(&layout.faces_dir().join(file))
}

/// Write each part into its pool under the source face's file name, replacing
/// any earlier cut of the same face
pub fn save_parts(layout: &Layout, file: &str, parts: &Parts) -> Result<()> {
    for (kind, part) in parts.iter() {
        let path = layout.pool_dir(kind).join(file);
        part.save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("saving {}", path.display()))?;
    }
    Ok(())
}

/// Files of the `kind` pool, sorted so seeded runs pick the same entries
pub fn list_pool(layout: &Layout, kind: PartKind) -> Result<Vec<PathBuf>> {
    let dir = layout.pool_dir(kind);
    if !dir.is_dir() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Uniformly pick one file from the `kind` pool
pub fn choose_part<R: Rng + ?Sized>(
    layout: &Layout,
    kind: PartKind,
    rng: &mut R,
) -> Result<PathBuf> {
    let files = list_pool(layout, kind)?;
    match files.choose(rng) {
        Some(path) => Ok(path.clone()),
        None => Err(PoolError::Empty {
            kind,
            path: layout.pool_dir(kind),
        }
        .into()),
    }
}
