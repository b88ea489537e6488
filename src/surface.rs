//! Indexed-colour pixel surfaces.
//!
//! The blitter only needs two capabilities: reading a colour index from a
//! source and writing one to a target. [`IndexedImage`] provides both and is
//! used for the sprite sheet as well as the frame buffer.

/// Palette index of a pixel.
pub type ColorIndex = u8;

/// Colour index reserved as "no pixel".
pub const TRANSPARENT: ColorIndex = 0;

/// Read access to a surface.
pub trait PixelSource {
    /// Colour at `(x, y)`. Out-of-range reads return [`TRANSPARENT`].
    fn pixel(&self, x: i32, y: i32) -> ColorIndex;
}

/// Write access to a surface.
pub trait PixelTarget {
    /// Write `color` at `(x, y)`. Out-of-range writes are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: ColorIndex);
}

/// Row-major buffer of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    pixels: Vec<ColorIndex>,
}

impl IndexedImage {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Wrap existing pixel data. Returns `None` if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<ColorIndex>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[ColorIndex] {
        &self.pixels
    }

    /// Fill the whole image with one colour.
    pub fn clear(&mut self, color: ColorIndex) {
        self.pixels.fill(color);
    }

    /// Number of pixels that are not [`TRANSPARENT`].
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != TRANSPARENT).count()
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl PixelSource for IndexedImage {
    fn pixel(&self, x: i32, y: i32) -> ColorIndex {
        self.offset(x, y)
            .map_or(TRANSPARENT, |offset| self.pixels[offset])
    }
}

impl PixelTarget for IndexedImage {
    fn set_pixel(&mut self, x: i32, y: i32, color: ColorIndex) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_transparent() {
        let img = IndexedImage::new(4, 3);
        assert_eq!(img.pixels().len(), 12);
        assert_eq!(img.opaque_count(), 0);
    }

    #[test]
    fn set_and_get_in_range() {
        let mut img = IndexedImage::new(4, 3);
        img.set_pixel(3, 2, 7);
        assert_eq!(img.pixel(3, 2), 7);
        assert_eq!(img.pixels()[2 * 4 + 3], 7);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut img = IndexedImage::new(4, 3);
        img.set_pixel(-1, 0, 5);
        img.set_pixel(0, -1, 5);
        img.set_pixel(4, 0, 5);
        img.set_pixel(0, 3, 5);
        img.set_pixel(i32::MAX, i32::MIN, 5);
        assert_eq!(img.opaque_count(), 0);
    }

    #[test]
    fn out_of_range_reads_are_transparent() {
        let mut img = IndexedImage::new(2, 2);
        img.clear(9);
        assert_eq!(img.pixel(-1, 0), TRANSPARENT);
        assert_eq!(img.pixel(2, 1), TRANSPARENT);
        assert_eq!(img.pixel(1, 1), 9);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(IndexedImage::from_pixels(2, 2, vec![1, 2, 3]).is_none());
        let img = IndexedImage::from_pixels(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.pixel(1, 0), 2);
        assert_eq!(img.pixel(0, 1), 3);
    }
}
