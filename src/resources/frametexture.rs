//! GPU texture the frame buffer is presented through.
//!
//! Each frame the indexed [`FrameBuffer`](super::surfaces::FrameBuffer) is
//! expanded to RGBA by the [`Palette`](super::palette::Palette), uploaded into
//! this texture and drawn scaled into the window with point filtering.
//!
//! # Note
//! This is a NonSend resource because `Texture2D` contains GPU resources
//! that must be accessed from the main thread.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

use crate::error::{Result, TumbleError};

/// Screen-sized RGBA texture.
pub struct FrameTexture {
    /// The underlying raylib texture, `R8G8B8A8`.
    pub texture: Texture2D,
    pub width: u32,
    pub height: u32,
}

impl FrameTexture {
    /// Create a black texture of the logical screen size.
    pub fn new(rl: &mut RaylibHandle, th: &RaylibThread, width: u32, height: u32) -> Result<Self> {
        let image = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        let texture = rl
            .load_texture_from_image(th, &image)
            .map_err(|e| TumbleError::FrameTexture(format!("failed to create texture: {e}")))?;

        // Pixel art: never blur when scaling up.
        unsafe {
            ffi::SetTextureFilter(*texture, TextureFilter::TEXTURE_FILTER_POINT as i32);
        }

        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Replace the texture contents with tightly packed RGBA8 pixels.
    pub fn upload(&mut self, rgba: &[u8]) -> Result<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if rgba.len() != expected {
            return Err(TumbleError::FrameTexture(format!(
                "expected {expected} bytes of RGBA, got {}",
                rgba.len()
            )));
        }
        // Length matches the R8G8B8A8 texture created in `new`.
        unsafe {
            ffi::UpdateTexture(*self.texture, rgba.as_ptr().cast());
        }
        Ok(())
    }

    /// Whole-texture source rectangle.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.width as f32,
            height: self.height as f32,
        }
    }
}
