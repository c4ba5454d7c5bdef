//! Per-pixel collision masks.
//!
//! Rectangles are too coarse to tell a head-stomp from a side hit when a
//! sprite has transparent margins, so enemy contact is tested on masks
//! derived from the sprite's alpha channel.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::config::GameConfig;

/// Alpha values above this count as solid.
const ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("failed to load mask image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("mask image {0} has no opaque pixels")]
    Empty(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl CollisionMask {
    /// Fully opaque box mask.
    pub fn solid(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn from_rgba(image: &RgbaImage) -> Self {
        let width = image.width() as i32;
        let height = image.height() as i32;
        let bits = image
            .pixels()
            .map(|pixel| pixel.0[3] > ALPHA_THRESHOLD)
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True when any opaque pixel of `self` coincides with one of `other`,
    /// where `other` sits at `offset` relative to `self`'s top-left.
    pub fn overlaps(&self, other: &CollisionMask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width).min(self.width);
        let y1 = (dy + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

pub fn load_mask_from_path(path: &Path) -> Result<CollisionMask, MaskError> {
    let image = image::open(path)
        .map_err(|source| MaskError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let mask = CollisionMask::from_rgba(&image);
    if mask.count() == 0 {
        return Err(MaskError::Empty(path.to_path_buf()));
    }
    Ok(mask)
}

/// The two masks every level instance shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masks {
    pub player: CollisionMask,
    pub enemy: CollisionMask,
}

impl Masks {
    /// Masks from the configured sprite images, or box masks of the
    /// configured sizes when no image is set or it fails to load.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            player: mask_or_box(config.player_mask_image.as_deref(), config.player_size),
            enemy: mask_or_box(config.enemy_mask_image.as_deref(), config.enemy_size),
        }
    }

    /// Entity boxes match their mask dimensions.
    pub fn player_size(&self) -> (i32, i32) {
        (self.player.width(), self.player.height())
    }

    pub fn enemy_size(&self) -> (i32, i32) {
        (self.enemy.width(), self.enemy.height())
    }
}

fn mask_or_box(path: Option<&Path>, size: (i32, i32)) -> CollisionMask {
    let Some(path) = path else {
        return CollisionMask::solid(size.0, size.1);
    };
    match load_mask_from_path(path) {
        Ok(mask) => {
            log::info!(
                "Loaded mask {} ({}x{}, {} opaque px)",
                path.display(),
                mask.width(),
                mask.height(),
                mask.count()
            );
            mask
        }
        Err(err) => {
            log::warn!("{err}; using a {}x{} box mask", size.0, size.1);
            CollisionMask::solid(size.0, size.1)
        }
    }
}
