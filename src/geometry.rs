//! Rotation geometry shared by the blitter and the tumble controller.
//!
//! Angles are in degrees and counter-clockwise positive in the usual
//! mathematical sense. Screen space has `y` growing downwards, so a positive
//! angle turns a sprite clockwise on screen.

use glam::Vec2;

/// Tolerance used when two screen coordinates are compared for a tie.
pub const TIE_EPSILON: f32 = 1e-4;

/// Sine and cosine of an angle in degrees, in double precision.
///
/// Whole multiples of 90 degrees return exact values so that a sprite resting
/// between rotations sits on integer coordinates.
pub fn sin_cos_deg_f64(angle_deg: f64) -> (f64, f64) {
    let turn = angle_deg.rem_euclid(360.0);
    if turn.fract() == 0.0 && (turn as u32) % 90 == 0 {
        return match turn as u32 {
            0 => (0.0, 1.0),
            90 => (1.0, 0.0),
            180 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    let radians = angle_deg.to_radians();
    (radians.sin(), radians.cos())
}

/// [`sin_cos_deg_f64`] narrowed to `f32`.
pub fn sin_cos_deg(angle_deg: f32) -> (f32, f32) {
    let (sin, cos) = sin_cos_deg_f64(angle_deg as f64);
    (sin as f32, cos as f32)
}

/// Rotate an offset around the origin, given the angle's sine and cosine.
#[inline]
pub fn rotate_offset(offset: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

/// Map a local point to screen space given a pivot known in both spaces.
pub fn local_to_screen(local: Vec2, pivot_local: Vec2, pivot_screen: Vec2, angle_deg: f32) -> Vec2 {
    let (sin, cos) = sin_cos_deg(angle_deg);
    pivot_screen + rotate_offset(local - pivot_local, sin, cos)
}

/// The four corners of a `width` x `height` rectangle in local space.
///
/// Order: top-left, top-right, bottom-right, bottom-left.
pub fn rect_corners(width: u32, height: u32) -> [Vec2; 4] {
    let (w, h) = (width as f32, height as f32);
    [
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ]
}

/// Index of the visually lowest point; rightmost among equally low points.
///
/// Returns `None` for an empty slice. On exact duplicates the first one wins.
pub fn lowest_rightmost(points: &[Vec2]) -> Option<usize> {
    let mut best: Option<(usize, Vec2)> = None;
    for (index, &p) in points.iter().enumerate() {
        let better = match best {
            None => true,
            Some((_, b)) => {
                p.y > b.y + TIE_EPSILON || ((p.y - b.y).abs() <= TIE_EPSILON && p.x > b.x + TIE_EPSILON)
            }
        };
        if better {
            best = Some((index, p));
        }
    }
    best.map(|(index, _)| index)
}

/// Pivot expressed in both coordinate spaces plus the accumulated angle.
///
/// `screen` is where `local` lands on screen. It is assigned, never derived,
/// which keeps the pair consistent across re-pivots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotState {
    /// Pivot in sprite-local coordinates.
    pub local: Vec2,
    /// Pivot in screen coordinates.
    pub screen: Vec2,
    /// Accumulated rotation in degrees.
    pub angle_deg: f32,
}

impl PivotState {
    pub fn new(local: Vec2, screen: Vec2, angle_deg: f32) -> Self {
        Self {
            local,
            screen,
            angle_deg,
        }
    }

    /// Screen position of a local point under the current pivot and angle.
    pub fn to_screen(&self, local: Vec2) -> Vec2 {
        local_to_screen(local, self.local, self.screen, self.angle_deg)
    }
}
