//! Tumbling block controller.
//!
//! [`TumbleController`] owns the whole animation: which sprite is showing,
//! where its pivot is, how far the current quarter turn has progressed and
//! when the sprite has rolled off screen. The host advances it once per frame
//! with [`TumbleController::update`] and renders it with
//! [`TumbleController::draw`].
//!
//! A tumble is a 90 degree rotation about the corner that is lowest on screen
//! (rightmost on ties). Before every tumble the pivot is moved to that corner
//! in both local and screen space, so the angle keeps accumulating while the
//! sprite appears to roll over its edge instead of spinning in place.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::blit::rotated_blit;
use crate::error::{Result, TumbleError};
use crate::geometry::{PivotState, lowest_rightmost, rect_corners};
use crate::resources::catalog::{SpriteCatalog, SpriteRegion};
use crate::resources::gameconfig::GameConfig;
use crate::surface::{PixelSource, PixelTarget};

/// How a new sprite is picked on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Uniformly at random from the catalog.
    #[default]
    Random,
    /// Catalog order, wrapping around.
    Sequential,
}

impl FromStr for SelectionMode {
    type Err = TumbleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "sequential" => Ok(Self::Sequential),
            other => Err(TumbleError::InvalidConfig {
                key: "tumble.selection",
                reason: format!("unknown selection mode `{other}`"),
            }),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Sequential => f.write_str("sequential"),
        }
    }
}

/// Tuning values for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleSettings {
    /// Bounds check width; x must stay within `[0, screen_width]`.
    pub screen_width: u32,
    /// Bounds check height; y must stay within `[0, screen_height]`.
    pub screen_height: u32,
    /// Degrees turned per frame while rotating.
    pub angle_per_frame: u32,
    /// Screen position of the bottom-right corner after a reset.
    pub reset_pivot: Vec2,
    pub selection: SelectionMode,
}

impl Default for TumbleSettings {
    fn default() -> Self {
        GameConfig::new().tumble_settings()
    }
}

/// Degrees left in the current quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationJob {
    pub remaining_degrees: u32,
}

impl RotationJob {
    pub const QUARTER_TURN: u32 = 90;

    pub fn quarter_turn() -> Self {
        Self {
            remaining_degrees: Self::QUARTER_TURN,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_degrees > 0
    }

    /// Consume up to `max_step` degrees and return how many were consumed.
    pub fn tick(&mut self, max_step: u32) -> u32 {
        let step = self.remaining_degrees.min(max_step);
        self.remaining_degrees -= step;
        step
    }
}

/// Everything the controller mutates frame to frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub region: SpriteRegion,
    /// Corners of `region` in local space, see [`rect_corners`].
    pub corners: [Vec2; 4],
    pub pivot: PivotState,
    pub job: RotationJob,
    pub is_rotating: bool,
}

impl AnimationState {
    /// Idle state for `region` with its bottom-right corner at `screen_pivot`.
    pub fn at_rest(region: SpriteRegion, screen_pivot: Vec2) -> Self {
        let corners = rect_corners(region.width, region.height);
        Self {
            region,
            corners,
            pivot: PivotState::new(corners[2], screen_pivot, 0.0),
            job: RotationJob::default(),
            is_rotating: false,
        }
    }

    /// Current screen positions of the four corners.
    pub fn screen_corners(&self) -> [Vec2; 4] {
        self.corners.map(|c| self.pivot.to_screen(c))
    }
}

/// What happened during one [`TumbleController::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Sound to play because a rotation started this frame.
    pub sound: Option<u32>,
    /// The sprite left the screen and a new one was chosen.
    pub reset: bool,
}

/// Owner of the tumbling sprite's [`AnimationState`].
#[derive(Resource, Debug)]
pub struct TumbleController {
    settings: TumbleSettings,
    catalog: SpriteCatalog,
    rng: fastrand::Rng,
    next_index: usize,
    state: AnimationState,
}

impl TumbleController {
    /// Create a controller and perform the initial reset.
    ///
    /// `rng` drives random region selection; pass a seeded generator for
    /// reproducible runs.
    pub fn new(settings: TumbleSettings, catalog: SpriteCatalog, rng: fastrand::Rng) -> Result<Self> {
        if settings.angle_per_frame == 0 {
            return Err(TumbleError::InvalidConfig {
                key: "tumble.angle_per_frame",
                reason: "must be greater than zero".to_string(),
            });
        }
        if catalog.is_empty() {
            return Err(TumbleError::EmptyCatalog);
        }

        let placeholder = AnimationState::at_rest(catalog.get_wrapped(0), settings.reset_pivot);
        let mut controller = Self {
            settings,
            catalog,
            rng,
            next_index: 0,
            state: placeholder,
        };
        controller.reset_state();
        Ok(controller)
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Replace the animation state.
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: AnimationState) {
        self.state = state;
    }

    pub fn settings(&self) -> &TumbleSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &SpriteCatalog {
        &self.catalog
    }

    pub fn is_rotating(&self) -> bool {
        self.state.is_rotating
    }

    /// Pick a new sprite and put it at rest on the reset position.
    pub fn reset_state(&mut self) {
        let region = self.choose_region();
        self.state = AnimationState::at_rest(region, self.settings.reset_pivot);
        debug!(
            "Tumble reset: region {}x{} at ({}, {}), sound {}",
            region.width, region.height, region.x, region.y, region.sound
        );
    }

    fn choose_region(&mut self) -> SpriteRegion {
        match self.settings.selection {
            SelectionMode::Random => {
                let index = self.rng.usize(..self.catalog.len());
                self.catalog.get_wrapped(index)
            }
            SelectionMode::Sequential => {
                let region = self.catalog.get_wrapped(self.next_index);
                self.next_index = (self.next_index + 1) % self.catalog.len();
                region
            }
        }
    }

    /// Advance one frame.
    ///
    /// `trigger` starts a quarter turn when idle and is ignored while
    /// rotating. The bounds check only runs once the sprite is at rest.
    pub fn update(&mut self, trigger: bool) -> FrameReport {
        let mut report = FrameReport::default();

        if trigger && !self.state.is_rotating {
            self.pick_new_pivot();
            self.state.job = RotationJob::quarter_turn();
            self.state.is_rotating = true;
            report.sound = Some(self.state.region.sound);
            debug!(
                "Tumble start: pivot local {:?} screen {:?} angle {}",
                self.state.pivot.local, self.state.pivot.screen, self.state.pivot.angle_deg
            );
        }

        if self.state.is_rotating {
            let step = self.state.job.tick(self.settings.angle_per_frame);
            self.state.pivot.angle_deg += step as f32;
            if !self.state.job.is_active() {
                self.state.is_rotating = false;
            }
        }

        if !self.state.is_rotating && !self.is_on_screen() {
            self.reset_state();
            report.reset = true;
        }

        report
    }

    /// Move the pivot to the lowest, then rightmost, corner on screen.
    ///
    /// The angle is unchanged, so the sprite does not move on screen.
    pub fn pick_new_pivot(&mut self) {
        let screen = self.state.screen_corners();
        let Some(index) = lowest_rightmost(&screen) else {
            return;
        };
        self.state.pivot.local = self.state.corners[index];
        self.state.pivot.screen = screen[index];
    }

    /// Whether every corner lies within `[0, width] x [0, height]`.
    pub fn is_on_screen(&self) -> bool {
        let (w, h) = (
            self.settings.screen_width as f32,
            self.settings.screen_height as f32,
        );
        self.state
            .screen_corners()
            .iter()
            .all(|c| (0.0..=w).contains(&c.x) && (0.0..=h).contains(&c.y))
    }

    /// Rasterise the current sprite from `sheet` onto `target`.
    pub fn draw<S, T>(&self, sheet: &S, target: &mut T)
    where
        S: PixelSource + ?Sized,
        T: PixelTarget + ?Sized,
    {
        let region = &self.state.region;
        let pivot = &self.state.pivot;
        rotated_blit(
            sheet,
            region.x,
            region.y,
            region.width,
            region.height,
            pivot.screen,
            pivot.local,
            pivot.angle_deg,
            target,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::IndexedImage;

    fn square_catalog(size: u32) -> SpriteCatalog {
        SpriteCatalog::new(vec![SpriteRegion::new(0, 0, size, size, 3)]).unwrap()
    }

    fn controller(catalog: SpriteCatalog) -> TumbleController {
        TumbleController::new(TumbleSettings::default(), catalog, fastrand::Rng::with_seed(1)).unwrap()
    }

    /// 10x10 square resting with local (10, 10) on screen (50, 50).
    fn scenario() -> TumbleController {
        let mut c = controller(square_catalog(10));
        let mut state = AnimationState::at_rest(SpriteRegion::new(0, 0, 10, 10, 3), Vec2::new(50.0, 50.0));
        state.pivot.local = Vec2::new(10.0, 10.0);
        c.set_state(state);
        c
    }

    fn run_full_tumble(c: &mut TumbleController) -> Vec<FrameReport> {
        let mut reports = vec![c.update(true)];
        for _ in 0..5 {
            reports.push(c.update(false));
        }
        reports
    }

    fn sorted(mut points: [Vec2; 4]) -> [Vec2; 4] {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    #[test]
    fn zero_step_is_rejected() {
        let settings = TumbleSettings {
            angle_per_frame: 0,
            ..TumbleSettings::default()
        };
        assert!(TumbleController::new(settings, square_catalog(4), fastrand::Rng::new()).is_err());
    }

    #[test]
    fn selection_mode_parses_and_prints() {
        assert_eq!("Random".parse::<SelectionMode>().unwrap(), SelectionMode::Random);
        assert_eq!(" sequential ".parse::<SelectionMode>().unwrap(), SelectionMode::Sequential);
        assert!("shuffle".parse::<SelectionMode>().is_err());
        assert_eq!(SelectionMode::Sequential.to_string(), "sequential");
    }

    #[test]
    fn rotation_job_finishes_after_six_steps() {
        let mut job = RotationJob::quarter_turn();
        for _ in 0..5 {
            assert_eq!(job.tick(15), 15);
        }
        assert_eq!(job.remaining_degrees, 15);
        assert!(job.is_active());
        assert_eq!(job.tick(15), 15);
        assert_eq!(job.remaining_degrees, 0);
        assert!(!job.is_active());
        assert_eq!(job.tick(15), 0);
    }

    #[test]
    fn rotation_job_clamps_last_step() {
        let mut job = RotationJob::quarter_turn();
        assert_eq!(job.tick(40), 40);
        assert_eq!(job.tick(40), 40);
        assert_eq!(job.tick(40), 10);
        assert!(!job.is_active());
    }

    #[test]
    fn reset_places_bottom_right_on_reset_pivot() {
        let catalog = SpriteCatalog::default();
        for seed in 0..50 {
            let mut c = TumbleController::new(
                TumbleSettings::default(),
                catalog.clone(),
                fastrand::Rng::with_seed(seed),
            )
            .unwrap();
            c.reset_state();
            let s = c.state();
            assert!(catalog.contains(&s.region));
            assert_eq!(
                s.pivot.local,
                Vec2::new(s.region.width as f32, s.region.height as f32)
            );
            assert_eq!(s.pivot.screen, Vec2::new(40.0, 20.0));
            assert_eq!(s.pivot.angle_deg, 0.0);
            assert!(!s.is_rotating);
            assert_eq!(s.job, RotationJob::default());
        }
    }

    #[test]
    fn random_selection_reaches_every_region() {
        let catalog = SpriteCatalog::default();
        let mut c = TumbleController::new(
            TumbleSettings::default(),
            catalog.clone(),
            fastrand::Rng::with_seed(42),
        )
        .unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            c.reset_state();
            seen.insert(c.state().region);
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let picks = |seed| {
            let mut c = TumbleController::new(
                TumbleSettings::default(),
                SpriteCatalog::default(),
                fastrand::Rng::with_seed(seed),
            )
            .unwrap();
            (0..20)
                .map(|_| {
                    c.reset_state();
                    c.state().region
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(9), picks(9));
    }

    #[test]
    fn sequential_selection_cycles() {
        let regions = vec![
            SpriteRegion::new(0, 0, 4, 4, 0),
            SpriteRegion::new(4, 0, 5, 5, 1),
            SpriteRegion::new(9, 0, 6, 6, 2),
        ];
        let settings = TumbleSettings {
            selection: SelectionMode::Sequential,
            ..TumbleSettings::default()
        };
        let mut c = TumbleController::new(
            settings,
            SpriteCatalog::new(regions.clone()).unwrap(),
            fastrand::Rng::new(),
        )
        .unwrap();
        assert_eq!(c.state().region, regions[0]);
        c.reset_state();
        assert_eq!(c.state().region, regions[1]);
        c.reset_state();
        assert_eq!(c.state().region, regions[2]);
        c.reset_state();
        assert_eq!(c.state().region, regions[0]);
    }

    #[test]
    fn scenario_pivot_stays_on_bottom_right() {
        let mut c = scenario();
        c.pick_new_pivot();
        assert_eq!(c.state().pivot.local, Vec2::new(10.0, 10.0));
        assert_eq!(c.state().pivot.screen, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn scenario_quarter_turn_rolls_right() {
        let mut c = scenario();
        let reports = run_full_tumble(&mut c);

        assert_eq!(reports[0].sound, Some(3));
        assert!(reports.iter().skip(1).all(|r| r.sound.is_none()));
        assert!(reports.iter().all(|r| !r.reset));
        assert_eq!(c.state().pivot.angle_deg, 90.0);
        assert_eq!(
            sorted(c.state().screen_corners()),
            sorted([
                Vec2::new(50.0, 40.0),
                Vec2::new(50.0, 50.0),
                Vec2::new(60.0, 40.0),
                Vec2::new(60.0, 50.0),
            ])
        );
    }

    #[test]
    fn second_tumble_pivots_on_new_corner() {
        let mut c = scenario();
        run_full_tumble(&mut c);
        c.pick_new_pivot();
        assert_eq!(c.state().pivot.local, Vec2::new(10.0, 0.0));
        assert_eq!(c.state().pivot.screen, Vec2::new(60.0, 50.0));
    }

    #[test]
    fn square_tie_prefers_right_corner() {
        let mut c = scenario();
        let mut state = c.state().clone();
        state.pivot = PivotState::new(Vec2::ZERO, Vec2::new(50.0, 50.0), 0.0);
        c.set_state(state);

        // Bottom corners (50, 60) and (60, 60) share y.
        c.pick_new_pivot();
        assert_eq!(c.state().pivot.local, Vec2::new(10.0, 10.0));
        assert_eq!(c.state().pivot.screen, Vec2::new(60.0, 60.0));
    }

    #[test]
    fn pick_new_pivot_is_deterministic_and_keeps_pose() {
        let mut a = scenario();
        run_full_tumble(&mut a);
        let before = sorted(a.state().screen_corners());
        let mut b = TumbleController::new(
            TumbleSettings::default(),
            square_catalog(10),
            fastrand::Rng::with_seed(77),
        )
        .unwrap();
        b.set_state(a.state().clone());

        a.pick_new_pivot();
        b.pick_new_pivot();
        assert_eq!(a.state(), b.state());
        assert_eq!(sorted(a.state().screen_corners()), before);
    }

    #[test]
    fn step_counts_through_update() {
        let mut c = scenario();
        c.update(true);
        for _ in 0..4 {
            c.update(false);
        }
        assert!(c.is_rotating());
        assert_eq!(c.state().job.remaining_degrees, 15);

        c.update(false);
        assert!(!c.is_rotating());
        assert_eq!(c.state().job.remaining_degrees, 0);
    }

    #[test]
    fn triggers_while_rotating_are_ignored() {
        let mut c = scenario();
        assert_eq!(c.update(true).sound, Some(3));
        let pivot = c.state().pivot.local;
        let report = c.update(true);
        assert_eq!(report.sound, None);
        assert_eq!(c.state().job.remaining_degrees, 60);
        assert_eq!(c.state().pivot.local, pivot);
    }

    #[test]
    fn idle_on_screen_update_changes_nothing() {
        let mut c = scenario();
        let before = c.state().clone();
        for _ in 0..10 {
            assert_eq!(c.update(false), FrameReport::default());
        }
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn edges_of_the_screen_count_as_inside() {
        let mut c = scenario();
        let mut state = c.state().clone();
        state.pivot.screen = Vec2::new(160.0, 120.0);
        c.set_state(state.clone());
        assert!(c.is_on_screen());
        assert!(!c.update(false).reset);
        assert_eq!(c.state(), &state);
    }

    #[test]
    fn leaving_the_screen_resets() {
        let mut c = scenario();
        let mut state = c.state().clone();
        state.pivot.screen = Vec2::new(170.0, 50.0);
        state.pivot.angle_deg = 270.0;
        c.set_state(state);

        let report = c.update(false);
        assert!(report.reset);
        assert_eq!(c.state().pivot.angle_deg, 0.0);
        assert_eq!(c.state().pivot.screen, Vec2::new(40.0, 20.0));
        assert_eq!(c.state().pivot.local, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn no_reset_while_rotating() {
        let mut c = scenario();
        c.update(true);
        let mut state = c.state().clone();
        state.pivot.screen = Vec2::new(-100.0, -100.0);
        c.set_state(state);

        let report = c.update(false);
        assert!(!report.reset);
        assert!(c.is_rotating());
        assert_eq!(c.state().pivot.screen, Vec2::new(-100.0, -100.0));
    }

    #[test]
    fn square_rolls_off_the_right_edge_after_thirteen_tumbles() {
        // Reset at (40, 20): the square spans x 30..40 and moves 10 per tumble.
        let mut c = controller(square_catalog(10));
        let right_edge = |c: &TumbleController| {
            c.state()
                .screen_corners()
                .iter()
                .map(|p| p.x)
                .fold(f32::MIN, f32::max)
        };
        for tumble in 1..=13 {
            let reports = run_full_tumble(&mut c);
            let reset = reports.iter().any(|r| r.reset);
            if tumble < 13 {
                assert!(!reset, "reset too early at tumble {tumble}");
                assert_eq!(right_edge(&c), 40.0 + 10.0 * tumble as f32);
            } else {
                assert!(reset, "expected reset after tumble 13");
                assert_eq!(c.state().pivot.screen, Vec2::new(40.0, 20.0));
            }
        }
    }

    #[test]
    fn full_circle_restores_pose() {
        let mut c = scenario();
        let start = sorted(c.state().screen_corners());
        // Four tumbles move a square right by 40 px with the same pose.
        for _ in 0..4 {
            run_full_tumble(&mut c);
        }
        let end = sorted(c.state().screen_corners());
        for (s, e) in start.iter().zip(end.iter()) {
            assert!((e.x - (s.x + 40.0)).abs() <= 1.0);
            assert!((e.y - s.y).abs() <= 1.0);
        }
        assert_eq!(c.state().pivot.angle_deg, 360.0);
    }

    #[test]
    fn draw_blits_region_at_rest() {
        let mut sheet = IndexedImage::new(16, 16);
        for x in 0..10 {
            for y in 0..10 {
                sheet.set_pixel(x, y, 5);
            }
        }
        let c = scenario();
        let mut screen = IndexedImage::new(160, 120);
        c.draw(&sheet, &mut screen);

        assert_eq!(screen.opaque_count(), 100);
        assert_eq!(screen.pixel(40, 40), 5);
        assert_eq!(screen.pixel(49, 49), 5);
        assert_eq!(screen.pixel(50, 50), 0);
    }
}
