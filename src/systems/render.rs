//! Rendering systems.
//!
//! [`render_frame`] rasterises the tumbling sprite into the
//! [`FrameBuffer`] using the software rotated blit. With the `host` feature,
//! [`present_frame`] expands the frame buffer through the `Palette`, uploads
//! it into the `FrameTexture` and draws it to the raylib window, scaled by
//! the largest integer factor that fits and centred with letterboxing.
use bevy_ecs::prelude::*;

use crate::resources::surfaces::{FrameBuffer, SpriteSheet};
use crate::resources::tumble::TumbleController;
use crate::surface::TRANSPARENT;

#[cfg(feature = "host")]
use crate::resources::frametexture::FrameTexture;
#[cfg(feature = "host")]
use crate::resources::palette::Palette;
#[cfg(feature = "host")]
use crate::resources::screensize::ScreenSize;

/// Clear the frame buffer and draw the current sprite pose into it.
pub fn render_frame(
    controller: Res<TumbleController>,
    sheet: Res<SpriteSheet>,
    mut frame: ResMut<FrameBuffer>,
) {
    frame.clear(TRANSPARENT);
    controller.draw(&**sheet, &mut **frame);
}

/// Integer scale and top-left offset that fit `frame` into `window`.
pub fn letterbox(frame: (u32, u32), window: (i32, i32)) -> (i32, i32, i32) {
    let (fw, fh) = (frame.0.max(1) as i32, frame.1.max(1) as i32);
    let scale = (window.0 / fw).min(window.1 / fh).max(1);
    let x = (window.0 - fw * scale) / 2;
    let y = (window.1 - fh * scale) / 2;
    (scale, x, y)
}

/// Draw the frame buffer to the window.
///
/// The frame is expanded to RGBA through the palette, uploaded into the
/// [`FrameTexture`] and drawn `scale` times larger inside a black border.
#[cfg(feature = "host")]
pub fn present_frame(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut texture: NonSendMut<FrameTexture>,
    screen: Res<ScreenSize>,
    frame: Res<FrameBuffer>,
    palette: Res<Palette>,
) {
    use raylib::prelude::*;

    if let Err(e) = texture.upload(&palette.to_rgba(&frame)) {
        log::warn!("Skipping frame upload: {}", e);
    }

    let window = (rl.get_screen_width(), rl.get_screen_height());
    let (scale, ox, oy) = letterbox((screen.w, screen.h), window);
    let dest = Rectangle {
        x: ox as f32,
        y: oy as f32,
        width: (screen.w as i32 * scale) as f32,
        height: (screen.h as i32 * scale) as f32,
    };

    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::BLACK);
    d.draw_texture_pro(
        &texture.texture,
        texture.source_rect(),
        dest,
        Vector2 { x: 0.0, y: 0.0 },
        0.0,
        Color::WHITE,
    );
}
