//! Colour palette resource.
//!
//! Sprites and the frame buffer store palette indices. The palette turns
//! decoded RGBA images into indices when the sprite sheet is loaded, and turns
//! the frame buffer back into RGBA bytes when it is presented.

use bevy_ecs::prelude::Resource;

use crate::surface::{ColorIndex, IndexedImage, TRANSPARENT};

/// Alpha below this value is treated as transparent when quantising.
const ALPHA_CUTOFF: u8 = 128;

/// Sixteen-colour default palette, `0xRRGGBB`.
const DEFAULT_COLORS: [u32; 16] = [
    0x000000, 0x2B335F, 0x7E2072, 0x19959C, 0x8B4852, 0x395C98, 0xA9C1FF, 0xEEEEEE, 0xD4186C,
    0xD38441, 0xE9C35B, 0x70C6A9, 0x7696DE, 0xA3A3A3, 0xFF9798, 0xEDC7B0,
];

/// Fixed list of RGB colours indexed by [`ColorIndex`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hex(&DEFAULT_COLORS)
    }
}

impl Palette {
    /// Build a palette from `0xRRGGBB` values.
    pub fn from_hex(colors: &[u32]) -> Self {
        Self {
            colors: colors
                .iter()
                .map(|&c| [(c >> 16) as u8, (c >> 8) as u8, c as u8])
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// RGB of an index. Unknown indices render black.
    pub fn rgb(&self, index: ColorIndex) -> [u8; 3] {
        self.colors.get(index as usize).copied().unwrap_or([0, 0, 0])
    }

    /// Nearest palette entry by squared RGB distance; the lower index wins ties.
    pub fn nearest(&self, rgb: [u8; 3]) -> ColorIndex {
        let distance = |c: &[u8; 3]| -> u32 {
            c.iter()
                .zip(rgb.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum()
        };
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| distance(c))
            .map_or(TRANSPARENT, |(index, _)| index as ColorIndex)
    }

    /// Quantise tightly packed RGBA8 pixels into an indexed image.
    ///
    /// Returns `None` if `rgba` does not hold exactly `width * height` pixels.
    pub fn quantize_rgba(&self, width: u32, height: u32, rgba: &[u8]) -> Option<IndexedImage> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| {
                if px[3] < ALPHA_CUTOFF {
                    TRANSPARENT
                } else {
                    self.nearest([px[0], px[1], px[2]])
                }
            })
            .collect();
        IndexedImage::from_pixels(width, height, pixels)
    }

    /// Expand an indexed image into opaque RGBA8 bytes.
    pub fn to_rgba(&self, image: &IndexedImage) -> Vec<u8> {
        let mut out = Vec::with_capacity(image.pixels().len() * 4);
        for &index in image.pixels() {
            let [r, g, b] = self.rgb(index);
            out.extend_from_slice(&[r, g, b, 255]);
        }
        out
    }
}
