//! Texture metadata loading.
//!
//! Only the image header is read: the demos need a texture's dimensions to
//! lay out sprite frames, and uploading pixels is the renderer's job.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture {name} is {width}px wide, which does not split into {frames} frames")]
    UnevenFrames {
        name: String,
        width: u32,
        frames: u32,
    },
}

/// A loaded texture as the demos see it: a name the presenter can resolve
/// and its pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl TextureInfo {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| AssetError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            name: path.display().to_string(),
            width,
            height,
        })
    }

    /// Texture with known dimensions and no backing file, for headless runs.
    pub fn placeholder(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Width of one frame when the texture is a horizontal strip of `frames`.
    pub fn frame_width(&self, frames: u32) -> Result<u32, AssetError> {
        if frames == 0 || self.width % frames != 0 {
            return Err(AssetError::UnevenFrames {
                name: self.name.clone(),
                width: self.width,
                frames,
            });
        }
        Ok(self.width / frames)
    }
}
