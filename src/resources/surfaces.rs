//! Pixel surface resources.
//!
//! - [`SpriteSheet`] is the read-only indexed image all sprite regions are
//!   cut from.
//! - [`FrameBuffer`] is the logical screen the tumble is rasterised into each
//!   frame, later expanded through the [`Palette`](super::palette::Palette)
//!   by the host.

use bevy_ecs::prelude::Resource;
use std::ops::{Deref, DerefMut};

use crate::surface::IndexedImage;

/// Sprite sheet the catalog regions refer to.
#[derive(Resource, Debug, Clone)]
pub struct SpriteSheet(pub IndexedImage);

/// Screen-sized indexed image, cleared and redrawn every frame.
#[derive(Resource, Debug, Clone)]
pub struct FrameBuffer(pub IndexedImage);

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self(IndexedImage::new(width, height))
    }
}

impl Deref for SpriteSheet {
    type Target = IndexedImage;

    fn deref(&self) -> &IndexedImage {
        &self.0
    }
}

impl Deref for FrameBuffer {
    type Target = IndexedImage;

    fn deref(&self) -> &IndexedImage {
        &self.0
    }
}

impl DerefMut for FrameBuffer {
    fn deref_mut(&mut self) -> &mut IndexedImage {
        &mut self.0
    }
}

/// Decode an image file with raylib and quantise it to `palette`.
#[cfg(feature = "host")]
pub fn load_sprite_sheet(
    path: &std::path::Path,
    palette: &super::palette::Palette,
) -> crate::error::Result<SpriteSheet> {
    use crate::error::TumbleError;
    use raylib::prelude::*;

    let sheet_error = |reason: String| TumbleError::SpriteSheet {
        path: path.to_path_buf(),
        reason,
    };

    let path_str = path
        .to_str()
        .ok_or_else(|| sheet_error("path is not valid UTF-8".to_string()))?;
    let mut image = Image::load_image(path_str).map_err(|e| sheet_error(e.to_string()))?;
    image.set_format(PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8);

    let (width, height) = (image.width() as u32, image.height() as u32);
    let rgba: Vec<u8> = image
        .get_image_data()
        .iter()
        .flat_map(|c| [c.r, c.g, c.b, c.a])
        .collect();

    let indexed = palette
        .quantize_rgba(width, height, &rgba)
        .ok_or_else(|| sheet_error(format!("unexpected pixel data for {width}x{height} image")))?;
    log::info!(
        "Loaded sprite sheet {:?}: {}x{}, {} opaque pixels",
        path,
        width,
        height,
        indexed.opaque_count()
    );
    Ok(SpriteSheet(indexed))
}
