//! Software rotated blit.
//!
//! Forward-maps every source pixel through the rotation and writes it to the
//! nearest destination pixel. Nothing is interpolated, so angles away from a
//! quarter turn leave holes and double writes. That is the intended look of
//! the animation while a sprite is mid-tumble.
//!
//! Destinations are computed in `f64` and rounded half to even, so the holes
//! and double writes land on the same pixels in every frame of a tumble.

use glam::{DVec2, Vec2};

use crate::geometry::sin_cos_deg_f64;
use crate::surface::{PixelSource, PixelTarget, TRANSPARENT};

/// Draw the `w` x `h` region at `(src_x, src_y)` of `source` onto `target`,
/// rotated by `angle_deg` so that `pivot_local` lands on `pivot_screen`.
///
/// Transparent pixels are skipped. Destination coordinates are rounded to the
/// nearest integer, ties to even, and later source pixels overwrite earlier
/// ones. No clipping
/// happens here: the target drops out-of-range writes.
#[allow(clippy::too_many_arguments)]
pub fn rotated_blit<S, T>(
    source: &S,
    src_x: i32,
    src_y: i32,
    w: u32,
    h: u32,
    pivot_screen: Vec2,
    pivot_local: Vec2,
    angle_deg: f32,
    target: &mut T,
) where
    S: PixelSource + ?Sized,
    T: PixelTarget + ?Sized,
{
    let (sin, cos) = sin_cos_deg_f64(angle_deg as f64);
    let pivot_screen = pivot_screen.as_dvec2();
    let pivot_local = pivot_local.as_dvec2();

    for i in 0..w as i32 {
        for j in 0..h as i32 {
            let color = source.pixel(src_x + i, src_y + j);
            if color == TRANSPARENT {
                continue;
            }

            let d = DVec2::new(i as f64, j as f64) - pivot_local;
            let sx = pivot_screen.x + (d.x * cos - d.y * sin);
            let sy = pivot_screen.y + (d.x * sin + d.y * cos);
            target.set_pixel(
                sx.round_ties_even() as i32,
                sy.round_ties_even() as i32,
                color,
            );
        }
    }
}
